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

use cardpress_core::types::choice::ChoiceSet;
use cardpress_core::types::content::CardContent;
use maud::PreEscaped;
use maud::html;

/// Produce the note markup for one record.
///
/// Plain cards pass the image-resolved text through verbatim. Choice cards
/// get a front with the question stem and the options list in parsed order
/// (the order a script-less viewer will see), and a back stating the correct
/// letter and its text. The display-time shuffle lives in the choice
/// template, not here: compile time never fixes an order, and the front
/// never carries the answer.
pub fn render_card(front: String, back: String, choice: Option<ChoiceSet>) -> CardContent {
    match choice {
        None => CardContent::Plain {
            front_html: front,
            back_html: back,
        },
        Some(choice) => CardContent::Choice {
            front_html: choice_front(&choice),
            back_html: choice_back(&choice),
            choice,
        },
    }
}

fn choice_front(choice: &ChoiceSet) -> String {
    html! {
        div class="question" { (PreEscaped(choice.question())) }
        ol id="choices" class="choices" {
            @for (letter, text) in choice.options() {
                li data-letter=(letter) {
                    span class="choice-letter" { (letter) "." }
                    " "
                    (PreEscaped(text))
                }
            }
        }
    }
    .into_string()
}

fn choice_back(choice: &ChoiceSet) -> String {
    html! {
        p class="correct" {
            "Correct answer: "
            b { (choice.correct()) "." }
            " "
            (PreEscaped(choice.correct_text()))
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_choice() -> ChoiceSet {
        ChoiceSet::new(
            "What is 2+2?".to_string(),
            vec![
                ('A', "3".to_string()),
                ('B', "4".to_string()),
                ('C', "5".to_string()),
            ],
            'B',
        )
        .unwrap()
    }

    #[test]
    fn test_plain_card_is_verbatim() {
        let content = render_card("Capital of France?".to_string(), "Paris".to_string(), None);
        assert_eq!(content.front_html(), "Capital of France?");
        assert_eq!(content.back_html(), "Paris");
    }

    #[test]
    fn test_resolved_markup_passes_through_unescaped() {
        let content = render_card(
            "<img src=\"cat.png\">".to_string(),
            "A cat".to_string(),
            None,
        );
        assert_eq!(content.front_html(), "<img src=\"cat.png\">");
    }

    #[test]
    fn test_choice_front_lists_every_option_in_parsed_order() {
        let content = render_card(String::new(), String::new(), Some(make_choice()));
        let front = content.front_html();
        assert!(front.contains("What is 2+2?"));
        let a = front.find("data-letter=\"A\"").unwrap();
        let b = front.find("data-letter=\"B\"").unwrap();
        let c = front.find("data-letter=\"C\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_choice_front_does_not_reveal_the_answer() {
        let content = render_card(String::new(), String::new(), Some(make_choice()));
        assert!(!content.front_html().contains("Correct"));
    }

    #[test]
    fn test_choice_back_states_letter_and_text() {
        let content = render_card(String::new(), String::new(), Some(make_choice()));
        let back = content.back_html();
        assert!(back.contains("B"));
        assert!(back.contains("4"));
    }

    #[test]
    fn test_correct_letter_is_in_the_fallback_list() {
        let choice = make_choice();
        let correct = choice.correct();
        let content = render_card(String::new(), String::new(), Some(choice));
        assert!(
            content
                .front_html()
                .contains(&format!("data-letter=\"{correct}\""))
        );
    }
}
