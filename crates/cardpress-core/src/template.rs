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

/// Which of the two deck-scoped templates a note renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Plain,
    Choice,
}

/// A reusable card-rendering rule shared by all notes of its kind within one
/// deck. Exactly two templates exist per deck, one per kind, regardless of
/// how many notes use them.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: i64,
    pub kind: TemplateKind,
    pub name: &'static str,
    pub qfmt: &'static str,
    pub afmt: &'static str,
    pub css: &'static str,
}

impl Template {
    pub fn plain(id: i64) -> Self {
        Template {
            id,
            kind: TemplateKind::Plain,
            name: "Cardpress Basic",
            qfmt: PLAIN_QFMT,
            afmt: PLAIN_AFMT,
            css: PLAIN_CSS,
        }
    }

    pub fn choice(id: i64) -> Self {
        Template {
            id,
            kind: TemplateKind::Choice,
            name: "Cardpress Multiple Choice",
            qfmt: CHOICE_QFMT,
            afmt: CHOICE_AFMT,
            css: CHOICE_CSS,
        }
    }
}

const PLAIN_QFMT: &str = "{{Front}}";

const PLAIN_AFMT: &str = "{{FrontSide}}<hr id=\"answer\">{{Back}}";

// The script reorders the options list in place with a Fisher-Yates pass,
// every time the card is shown. The list markup itself stays in parsed
// order, which is what a viewer without scripting sees.
const CHOICE_QFMT: &str = r#"{{Front}}
<script>
(function () {
  var list = document.getElementById("choices");
  if (list === null) {
    return;
  }
  var items = Array.prototype.slice.call(list.children);
  for (var i = items.length - 1; i > 0; i--) {
    var j = Math.floor(Math.random() * (i + 1));
    var tmp = items[i];
    items[i] = items[j];
    items[j] = tmp;
  }
  for (var k = 0; k < items.length; k++) {
    list.appendChild(items[k]);
  }
})();
</script>"#;

const CHOICE_AFMT: &str = "{{FrontSide}}<hr id=\"answer\">{{Back}}";

const PLAIN_CSS: &str = r#".card {
  font-family: arial;
  font-size: 20px;
  text-align: center;
  color: black;
  background-color: white;
}
"#;

const CHOICE_CSS: &str = r#".card {
  font-family: arial;
  font-size: 20px;
  text-align: center;
  color: black;
  background-color: white;
}

.choices {
  display: inline-block;
  text-align: left;
  margin-top: 0.5em;
  list-style-type: none;
  padding-left: 0;
}

.choices li {
  margin: 0.2em 0;
}

.choice-letter {
  font-weight: bold;
}

.correct {
  margin-top: 0.5em;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_template_renders_both_fields() {
        let template = Template::plain(1);
        assert!(template.qfmt.contains("{{Front}}"));
        assert!(template.afmt.contains("{{Back}}"));
    }

    #[test]
    fn test_choice_template_shuffles_at_display_time() {
        let template = Template::choice(2);
        assert!(template.qfmt.contains("{{Front}}"));
        assert!(template.qfmt.contains("<script>"));
        assert!(template.qfmt.contains("Math.random"));
        // The answer side never appears on the front.
        assert!(!template.qfmt.contains("{{Back}}"));
    }

    #[test]
    fn test_choice_template_has_a_style_sheet() {
        let template = Template::choice(3);
        assert!(template.css.contains(".choices"));
    }
}
