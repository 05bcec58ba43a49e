// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::choice::ChoiceSet;

/// Heuristic multiple-choice detection over one front/back pair.
///
/// The gate is the back text: trimmed, it must be exactly one of the letters
/// A-E. The front text is then split into a question stem and lettered
/// options by a line-oriented state machine. If fewer than two options are
/// collected, or the answer letter is not among them, the record is not
/// multiple-choice and the caller falls back to a plain card.
///
/// Nothing here ever fails: ambiguous or malformed markup degrades to
/// `None`, it does not error.
pub fn parse_choice(front: &str, back: &str) -> Option<ChoiceSet> {
    let correct = answer_letter(back)?;
    let mut parser = Parser::new();
    for line in front.lines() {
        parser.feed(line);
    }
    parser.finish(correct)
}

/// The detection gate: the trimmed back text must be exactly one letter A-E.
fn answer_letter(back: &str) -> Option<char> {
    let trimmed = back.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if is_option_letter(letter) => Some(letter),
        _ => None,
    }
}

/// Only uppercase A-E name options. Marker-shaped lines with other letters
/// (e.g. `F.`) are ordinary text.
fn is_option_letter(c: char) -> bool {
    ('A'..='E').contains(&c)
}

enum Line {
    /// A line like `B. <text>` or `B: <text>`, starting a new option.
    Marker(char, String),
    /// Any other line.
    Text(String),
}

impl Line {
    fn read(line: &str) -> Self {
        let trimmed = line.trim_start();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), Some(sep))
                if is_option_letter(letter) && (sep == '.' || sep == ':') =>
            {
                Line::Marker(letter, chars.as_str().to_string())
            }
            _ => Line::Text(line.to_string()),
        }
    }
}

enum State {
    /// Accumulating question lines, before the first option marker.
    CollectingQuestion,
    /// Accumulating content lines for the option started by `letter`.
    CollectingOption { letter: char, content: Vec<String> },
}

struct Parser {
    state: State,
    question: Vec<String>,
    options: Vec<(char, String)>,
}

impl Parser {
    fn new() -> Self {
        Parser {
            state: State::CollectingQuestion,
            question: Vec::new(),
            options: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        match Line::read(line) {
            Line::Marker(letter, rest) => {
                self.finalize_option();
                self.state = State::CollectingOption {
                    letter,
                    content: vec![rest],
                };
            }
            Line::Text(text) => match &mut self.state {
                State::CollectingQuestion => self.question.push(text),
                State::CollectingOption { content, .. } => content.push(text),
            },
        }
    }

    /// Store the in-progress option, if any. A repeated letter overwrites
    /// the earlier text under the same key but keeps its position.
    fn finalize_option(&mut self) {
        let state = std::mem::replace(&mut self.state, State::CollectingQuestion);
        if let State::CollectingOption { letter, content } = state {
            let text = content.join("\n").trim().to_string();
            match self
                .options
                .iter_mut()
                .find(|(existing, _)| *existing == letter)
            {
                Some((_, slot)) => *slot = text,
                None => self.options.push((letter, text)),
            }
        }
    }

    fn finish(mut self, correct: char) -> Option<ChoiceSet> {
        self.finalize_option();
        let question = self.question.join("\n").trim().to_string();
        ChoiceSet::new(question, self.options, correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_multiple_choice() {
        let front = "What is 2+2?\nA. 3\nB. 4\nC. 5";
        let choice = parse_choice(front, "B").unwrap();
        assert_eq!(choice.question(), "What is 2+2?");
        assert_eq!(
            choice.options(),
            &[
                ('A', "3".to_string()),
                ('B', "4".to_string()),
                ('C', "5".to_string()),
            ]
        );
        assert_eq!(choice.correct(), 'B');
        assert_eq!(choice.correct_text(), "4");
    }

    #[test]
    fn test_plain_back_is_not_multiple_choice() {
        assert!(parse_choice("Capital of France?", "Paris").is_none());
    }

    #[test]
    fn test_letter_outside_a_to_e_is_not_multiple_choice() {
        // Even with option-shaped lines on the front.
        let front = "Pick one:\nA. foo\nB. bar\nF. baz";
        assert!(parse_choice(front, "F").is_none());
    }

    #[test]
    fn test_lowercase_back_is_not_multiple_choice() {
        let front = "Pick one:\nA. foo\nB. bar";
        assert!(parse_choice(front, "b").is_none());
    }

    #[test]
    fn test_whitespace_around_back_letter_is_accepted() {
        let front = "Pick one:\nA. foo\nB. bar";
        assert!(parse_choice(front, "  B \n").is_some());
    }

    #[test]
    fn test_single_option_falls_back_to_plain() {
        assert!(parse_choice("A. only option", "A").is_none());
    }

    #[test]
    fn test_answer_letter_missing_from_options_falls_back() {
        let front = "Pick one:\nA. foo\nB. bar";
        assert!(parse_choice(front, "C").is_none());
    }

    #[test]
    fn test_colon_markers() {
        let front = "Pick one:\nA: foo\nB: bar";
        let choice = parse_choice(front, "A").unwrap();
        assert_eq!(
            choice.options(),
            &[('A', "foo".to_string()), ('B', "bar".to_string())]
        );
    }

    #[test]
    fn test_multiline_question_and_options() {
        let front = "First line.\nSecond line.\nA. foo\nstill foo\nB. bar";
        let choice = parse_choice(front, "B").unwrap();
        assert_eq!(choice.question(), "First line.\nSecond line.");
        assert_eq!(choice.options()[0], ('A', "foo\nstill foo".to_string()));
    }

    #[test]
    fn test_marker_shaped_line_outside_a_to_e_joins_current_option() {
        let front = "Q?\nA. foo\nF. not a marker\nB. bar";
        let choice = parse_choice(front, "B").unwrap();
        assert_eq!(
            choice.options()[0],
            ('A', "foo\nF. not a marker".to_string())
        );
    }

    #[test]
    fn test_duplicate_letter_overwrites_in_place() {
        let front = "Q?\nA. first\nB. middle\nA. second";
        let choice = parse_choice(front, "B").unwrap();
        assert_eq!(
            choice.options(),
            &[('A', "second".to_string()), ('B', "middle".to_string())]
        );
    }

    #[test]
    fn test_blank_trailing_lines_are_trimmed() {
        let front = "Q?\nA. foo\n\n\nB. bar\n\n";
        let choice = parse_choice(front, "A").unwrap();
        assert_eq!(
            choice.options(),
            &[('A', "foo".to_string()), ('B', "bar".to_string())]
        );
    }

    #[test]
    fn test_marker_with_no_trailing_text() {
        let front = "Q?\nA.\nfoo\nB. bar";
        let choice = parse_choice(front, "B").unwrap();
        assert_eq!(choice.options()[0], ('A', "foo".to_string()));
    }

    #[test]
    fn test_indented_markers_are_recognized() {
        let front = "Q?\n  A. foo\n  B. bar";
        assert!(parse_choice(front, "A").is_some());
    }

    #[test]
    fn test_empty_front() {
        assert!(parse_choice("", "A").is_none());
    }
}
