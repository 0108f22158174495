use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One user's responses to a questionnaire, in item order.
///
/// Values are the raw response tokens (`"yes"`, `"no"`, `"moderate"`, ...)
/// exactly as the request layer received them. An `AnswerSet` carries no
/// guarantee of validity until it has been scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet {
    pub responses: Vec<String>,
}

impl AnswerSet {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
