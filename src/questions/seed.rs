use chrono::Utc;
use uuid::Uuid;

use super::model::{Difficulty, Question, TestCase};
use super::repository::QuestionRepository;
use crate::error::Result;

fn sample(
    title: &str,
    description: &str,
    difficulty: Difficulty,
    topic: &str,
    hints: &[&str],
    solution: &str,
    test_cases: &[(&str, &str)],
) -> Question {
    Question {
        id: Uuid::new_v4().simple().to_string(),
        title: title.to_string(),
        description: description.to_string(),
        difficulty,
        topic: topic.to_string(),
        hints: hints.iter().map(|h| h.to_string()).collect(),
        solution: solution.to_string(),
        tags: Vec::new(),
        test_cases: test_cases
            .iter()
            .map(|(input, expected)| TestCase {
                input: input.to_string(),
                expected_output: expected.to_string(),
            })
            .collect(),
        created_at: Utc::now(),
    }
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        sample(
            "Two Sum",
            "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.",
            Difficulty::Easy,
            "Arrays",
            &["Use a hash map", "Single pass through the array"],
            r#"function twoSum(nums, target) {
  const map = new Map();
  for (let i = 0; i < nums.length; i++) {
    const diff = target - nums[i];
    if (map.has(diff)) return [map.get(diff), i];
    map.set(nums[i], i);
  }
}"#,
            &[("nums = [2,7,11,15], target = 9", "[0,1]")],
        ),
        sample(
            "Valid Parentheses",
            "Given a string containing just the characters ()[]{}, determine if the input string is valid.",
            Difficulty::Easy,
            "Stacks",
            &["Use a stack", "Pop when you see a closing bracket"],
            r#"function isValid(s) {
  const stack = [];
  const map = { '(': ')', '{': '}', '[': ']' };
  for (const ch of s) {
    if (map[ch]) stack.push(map[ch]);
    else if (stack.pop() !== ch) return false;
  }
  return stack.length === 0;
}"#,
            &[(r#""()[]{}""#, "true"), (r#""(]""#, "false")],
        ),
        sample(
            "Merge Two Sorted Lists",
            "Merge two sorted linked lists and return it as a new sorted list.",
            Difficulty::Easy,
            "Linked Lists",
            &["Iterative pointer technique", "Dummy head node"],
            r#"function merge(l1, l2) {
  const dummy = new ListNode();
  let cur = dummy;
  while (l1 && l2) {
    if (l1.val < l2.val) { cur.next = l1; l1 = l1.next; }
    else { cur.next = l2; l2 = l2.next; }
    cur = cur.next;
  }
  cur.next = l1 || l2;
  return dummy.next;
}"#,
            &[("l1 = [1,2,4], l2 = [1,3,4]", "[1,1,2,3,4,4]")],
        ),
        sample(
            "Longest Substring Without Repeating Characters",
            "Given a string s, find the length of the longest substring without repeating characters.",
            Difficulty::Medium,
            "Strings",
            &["Sliding window", "Hash map of last seen indices"],
            r#"function lengthOfLongestSubstring(s) {
  const map = {};
  let left = 0, maxLen = 0;
  for (let right = 0; right < s.length; right++) {
    const ch = s[right];
    if (map[ch] >= left) left = map[ch] + 1;
    map[ch] = right;
    maxLen = Math.max(maxLen, right - left + 1);
  }
  return maxLen;
}"#,
            &[(r#""abcabcbb""#, "3")],
        ),
        sample(
            "Lowest Common Ancestor of a BST",
            "Given a binary search tree, find the lowest common ancestor (LCA) of two given nodes in the BST.",
            Difficulty::Medium,
            "Trees",
            &["BST property", "Iterative or recursive"],
            r#"function lowestCommonAncestor(root, p, q) {
  while (root) {
    if (p.val < root.val && q.val < root.val) root = root.left;
    else if (p.val > root.val && q.val > root.val) root = root.right;
    else return root;
  }
}"#,
            &[("root = [6,2,8,0,4,7,9,3,5], p = 2, q = 8", "6")],
        ),
    ]
}

/// Inserts the sample set unless the store already has questions.
/// Returns how many were inserted.
pub async fn seed_if_empty(repo: &dyn QuestionRepository) -> Result<usize> {
    let existing = repo.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Questions already exist, skipping seeding");
        return Ok(0);
    }

    let inserted = repo.insert_many(sample_questions()).await?;
    tracing::info!(inserted, "Sample questions inserted");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::InMemoryQuestionRepository;

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let repo = InMemoryQuestionRepository::new();
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 5);
        assert_eq!(seed_if_empty(&repo).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[test]
    fn test_samples_are_complete() {
        for q in sample_questions() {
            assert!(!q.title.is_empty());
            assert!(!q.solution.is_empty());
            assert!(!q.test_cases.is_empty());
        }
    }
}
