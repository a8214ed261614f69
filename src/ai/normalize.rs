use serde_json::{Map, Value};

use super::GeneratedQuestion;
use crate::questions::TestCase;

const DEFAULT_DESCRIPTION: &str = "Problem description not available";
const DEFAULT_SOLUTION: &str = "Solution will be provided based on your approach";
const DEFAULT_HINTS: [&str; 3] = [
    "Break down the problem into smaller parts",
    "Consider edge cases",
    "Think about time complexity",
];

/// Removes every ```json and ``` fence marker, then trims.
pub fn strip_markdown_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Turns raw model output into a complete question.
///
/// Missing or empty fields fall back to fixed defaults. Topic and difficulty
/// always echo the request. JSON that is not an object has no usable fields
/// and is fully defaulted; only unparseable output or `null` becomes the
/// description of an otherwise defaulted question.
pub fn normalize_question(raw: &str, topic: &str, difficulty: &str) -> GeneratedQuestion {
    let cleaned = strip_markdown_fences(raw);

    let fields = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(fields)) => fields,
        Ok(Value::Null) | Err(_) => {
            tracing::warn!(topic = %topic, "Generated question was not valid JSON, using raw text");
            return GeneratedQuestion {
                title: default_title(topic, difficulty),
                description: raw.to_string(),
                topic: topic.to_string(),
                difficulty: difficulty.to_string(),
                hints: default_hints(),
                solution: DEFAULT_SOLUTION.to_string(),
                test_cases: default_test_cases(),
            };
        }
        Ok(_) => Map::new(),
    };

    GeneratedQuestion {
        title: string_field(&fields, "title").unwrap_or_else(|| default_title(topic, difficulty)),
        description: string_field(&fields, "description")
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        topic: topic.to_string(),
        difficulty: difficulty.to_string(),
        hints: hints_field(&fields).unwrap_or_else(default_hints),
        solution: string_field(&fields, "solution").unwrap_or_else(|| DEFAULT_SOLUTION.to_string()),
        test_cases: test_cases_field(&fields).unwrap_or_else(default_test_cases),
    }
}

fn default_title(topic: &str, difficulty: &str) -> String {
    format!("{} {} Problem", difficulty, topic)
}

fn default_hints() -> Vec<String> {
    DEFAULT_HINTS.iter().map(|h| h.to_string()).collect()
}

fn default_test_cases() -> Vec<TestCase> {
    vec![TestCase {
        input: "sample input".to_string(),
        expected_output: "sample output".to_string(),
    }]
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn hints_field(fields: &Map<String, Value>) -> Option<Vec<String>> {
    let hints = fields.get("hints")?.as_array()?;
    Some(
        hints
            .iter()
            .map(|h| match h {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn test_cases_field(fields: &Map<String, Value>) -> Option<Vec<TestCase>> {
    let cases = fields.get("testCases")?.as_array()?;
    Some(
        cases
            .iter()
            .filter_map(|c| serde_json::from_value::<TestCase>(c.clone()).ok())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_markdown_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_markdown_fences("  plain  "), "plain");
    }

    #[test]
    fn test_fenced_json_is_parsed() {
        let raw = "```json\n{\"title\":\"Two Sum\",\"description\":\"Find pair\",\"topic\":\"ignored\",\"difficulty\":\"Hard\",\"hints\":[\"map\"],\"solution\":\"O(n)\",\"testCases\":[{\"input\":\"[1,2]\",\"expectedOutput\":\"3\"}]}\n```";
        let q = normalize_question(raw, "arrays", "easy");

        assert_eq!(q.title, "Two Sum");
        assert_eq!(q.description, "Find pair");
        assert_eq!(q.topic, "arrays");
        assert_eq!(q.difficulty, "easy");
        assert_eq!(q.hints, vec!["map".to_string()]);
        assert_eq!(q.solution, "O(n)");
        assert_eq!(q.test_cases[0].expected_output, "3");
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let q = normalize_question("{\"title\":\"\"}", "graphs", "Medium");

        assert_eq!(q.title, "Medium graphs Problem");
        assert_eq!(q.description, DEFAULT_DESCRIPTION);
        assert_eq!(q.hints.len(), 3);
        assert_eq!(q.solution, DEFAULT_SOLUTION);
        assert_eq!(q.test_cases, default_test_cases());
    }

    #[test]
    fn test_unparseable_output_becomes_description() {
        let raw = "Here is a question about trees...";
        let q = normalize_question(raw, "trees", "Hard");

        assert_eq!(q.title, "Hard trees Problem");
        assert_eq!(q.description, raw);
        assert_eq!(q.topic, "trees");
        assert_eq!(q.hints, default_hints());
    }

    #[test]
    fn test_non_object_json_is_defaulted() {
        for raw in ["[1, 2, 3]", "\"text\"", "42"] {
            let q = normalize_question(raw, "arrays", "easy");
            assert_eq!(q.title, "easy arrays Problem");
            assert_eq!(q.description, DEFAULT_DESCRIPTION);
            assert_eq!(q.hints, default_hints());
            assert_eq!(q.solution, DEFAULT_SOLUTION);
        }
    }

    #[test]
    fn test_null_output_becomes_description() {
        let q = normalize_question("null", "arrays", "easy");
        assert_eq!(q.description, "null");
    }
}
