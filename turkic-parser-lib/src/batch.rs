// Parallel analysis of many words against one shared configuration.

use std::panic;
use std::thread;

use crate::config::Config;
use crate::error::InvalidInputError;
use crate::morphology::analyze_word;
use crate::types::AnalysisResult;

/// Analyse `words` on up to `jobs` worker threads.
///
/// Results are returned in input order; an invalid word yields its own
/// error without affecting the others.
pub fn analyze_batch<S>(
    words: &[S],
    config: &Config,
    jobs: usize,
) -> Vec<Result<AnalysisResult, InvalidInputError>>
where
    S: AsRef<str> + Sync,
{
    let jobs = jobs.clamp(1, words.len().max(1));
    if jobs == 1 {
        return words.iter().map(|w| analyze_word(w.as_ref(), config)).collect();
    }

    let chunk = words.len().div_ceil(jobs);
    thread::scope(|s| {
        let handles: Vec<_> = words
            .chunks(chunk)
            .map(|part| {
                s.spawn(move || {
                    part.iter()
                        .map(|w| analyze_word(w.as_ref(), config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut out = Vec::with_capacity(words.len());
        for handle in handles {
            match handle.join() {
                Ok(part) => out.extend(part),
                Err(e) => panic::resume_unwind(e),
            }
        }
        out
    })
}
