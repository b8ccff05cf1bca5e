use serde::{Deserialize, Serialize};

use crate::request::DataRequest;

/// Result of a request's execution as the protocol sees it.
///
/// Two `Invalid` outcomes are equal; two `Answer` outcomes are equal when
/// their payloads match; an `Answer` never equals `Invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    /// A concrete answer string.
    Answer {
        /// The answer payload.
        answer: String,
    },
    /// The request could not be answered.
    Invalid,
}

impl Outcome {
    /// Builds an `Answer` outcome.
    pub fn answer(value: impl Into<String>) -> Self {
        Outcome::Answer {
            answer: value.into(),
        }
    }

    /// Returns true for `Invalid`.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Outcome::Invalid)
    }
}

/// Derives the outcome this node believes in for `request`.
///
/// A missing or failed execution is `Invalid`. A successful execution is an
/// `Answer`, unless the request restricts answers to an allow-list that does
/// not contain the produced data.
pub fn derive_outcome(request: &DataRequest) -> Outcome {
    let Some(data) = request
        .execute_result
        .as_ref()
        .and_then(|result| result.data())
    else {
        return Outcome::Invalid;
    };

    if !request.outcomes.is_empty() && !request.outcomes.iter().any(|o| o == data) {
        return Outcome::Invalid;
    }

    Outcome::answer(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::ExecuteResult;
    use crate::request::RequestConfig;

    fn request_with(result: Option<ExecuteResult>, outcomes: &[&str]) -> DataRequest {
        let mut request = DataRequest::new("1", "near", RequestConfig::default());
        request.execute_result = result;
        request.outcomes = outcomes.iter().map(|o| o.to_string()).collect();
        request
    }

    #[test]
    fn equality_follows_payloads() {
        assert_eq!(Outcome::Invalid, Outcome::Invalid);
        assert_eq!(Outcome::answer("yes"), Outcome::answer("yes"));
        assert_ne!(Outcome::answer("yes"), Outcome::answer("no"));
        assert_ne!(Outcome::answer("yes"), Outcome::Invalid);
    }

    #[test]
    fn missing_execution_is_invalid() {
        assert_eq!(derive_outcome(&request_with(None, &[])), Outcome::Invalid);
    }

    #[test]
    fn failed_execution_is_invalid() {
        let request = request_with(Some(ExecuteResult::error("timeout", 1)), &[]);
        assert_eq!(derive_outcome(&request), Outcome::Invalid);
    }

    #[test]
    fn any_answer_without_allow_list() {
        let request = request_with(Some(ExecuteResult::success("42", 0)), &[]);
        assert_eq!(derive_outcome(&request), Outcome::answer("42"));
    }

    #[test]
    fn allow_list_filters_answers() {
        let allowed = request_with(Some(ExecuteResult::success("yes", 0)), &["yes", "no"]);
        assert_eq!(derive_outcome(&allowed), Outcome::answer("yes"));

        let rejected = request_with(Some(ExecuteResult::success("maybe", 0)), &["yes", "no"]);
        assert_eq!(derive_outcome(&rejected), Outcome::Invalid);
    }

    #[test]
    fn serde_shape_is_tagged() {
        let json = serde_json::to_value(Outcome::answer("yes")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Answer", "answer": "yes" }));

        let json = serde_json::to_value(Outcome::Invalid).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Invalid" }));
    }
}
