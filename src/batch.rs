use std::collections::HashSet;

use serde::Serialize;

use crate::model::{BatchJob, SynthesisRequest};
use crate::tts;

/// One job per non-blank line. The identifier is the first whitespace
/// delimited token; a line with a single token gets `auto_NNN` from its
/// 1-based line number instead.
///
/// The iterator borrows `text` and can be cloned to walk it again.
pub fn parse_batch(text: &str) -> impl Iterator<Item = BatchJob> + Clone + '_ {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim();

        if line.is_empty() {
            return None;
        }

        let identifier = match line.split_once(char::is_whitespace) {
            Some((token, _)) => token.to_string(),
            None => format!("auto_{:03}", i + 1),
        };

        Some(BatchJob {
            identifier,
            content: line.to_string(),
        })
    })
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlannedJob {
    #[serde(flatten)]
    pub job: BatchJob,
    pub file_name: String,
    pub chunks: Vec<String>,
}

/// What the generate button would hand to the engine and the packager.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub request: SynthesisRequest,
    pub jobs: Vec<PlannedJob>,
}

impl BatchPlan {
    pub fn new(request: SynthesisRequest, text: &str) -> Self {
        let engine = request.engine();
        let mut file_names = HashSet::new();

        let jobs = parse_batch(text)
            .map(|job| {
                let file_name = job.file_name();

                if !file_names.insert(file_name.clone()) {
                    tracing::warn!(%file_name, "Duplicate identifier, archive entry will be shadowed");
                }

                PlannedJob {
                    chunks: tts::chunks_for(engine, &job.content),
                    file_name,
                    job,
                }
            })
            .collect();

        Self { request, jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
