//! Brill-style part-of-speech tagger.
//!
//! Tagging happens in two passes. The first assigns each token its lexicon
//! tag, or a guess from its shape when the word is unknown. The second
//! applies contextual transformation rules left to right. Tags follow the
//! Penn Treebank set.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::tokenizer::tokenize;

pub const DEFAULT_TAG: &str = "NN";

// Unknown words with these endings are guessed as adjectives.
const ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "able", "ible", "ive", "al", "ent"];

static DEFAULT_TAGGER: LazyLock<PosTagger> = LazyLock::new(PosTagger::english);

const LEXICON: &[(&str, &str)] = &[
    // determiners
    ("a", "DT"), ("an", "DT"), ("the", "DT"), ("this", "DT"), ("that", "DT"),
    ("these", "DT"), ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"),
    ("any", "DT"), ("no", "DT"), ("all", "DT"), ("another", "DT"),
    // pronouns
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"),
    ("we", "PRP"), ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"),
    ("them", "PRP"), ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("her", "PRP$"),
    ("its", "PRP$"), ("our", "PRP$"), ("their", "PRP$"), ("who", "WP"), ("what", "WP"),
    ("which", "WDT"), ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    // prepositions and conjunctions
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("from", "IN"), ("about", "IN"), ("into", "IN"), ("over", "IN"),
    ("after", "IN"), ("before", "IN"), ("under", "IN"), ("between", "IN"), ("through", "IN"),
    ("during", "IN"), ("without", "IN"), ("because", "IN"), ("if", "IN"), ("than", "IN"),
    ("while", "IN"), ("as", "IN"), ("and", "CC"), ("or", "CC"), ("but", "CC"), ("nor", "CC"),
    ("so", "RB"), ("to", "TO"),
    // modals
    ("can", "MD"), ("could", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"),
    ("shall", "MD"), ("should", "MD"), ("will", "MD"), ("would", "MD"),
    // be / have / do
    ("be", "VB"), ("is", "VBZ"), ("am", "VBP"), ("are", "VBP"), ("was", "VBD"),
    ("were", "VBD"), ("been", "VBN"), ("being", "VBG"), ("have", "VBP"), ("has", "VBZ"),
    ("had", "VBD"), ("having", "VBG"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"),
    // adverbs
    ("not", "RB"), ("very", "RB"), ("also", "RB"), ("just", "RB"), ("only", "RB"),
    ("then", "RB"), ("now", "RB"), ("here", "RB"), ("there", "EX"), ("too", "RB"),
    ("never", "RB"), ("always", "RB"), ("often", "RB"), ("again", "RB"), ("still", "RB"),
    // adjectives
    ("good", "JJ"), ("bad", "JJ"), ("new", "JJ"), ("old", "JJ"), ("great", "JJ"),
    ("big", "JJ"), ("small", "JJ"), ("large", "JJ"), ("high", "JJ"), ("low", "JJ"),
    ("important", "JJ"), ("different", "JJ"), ("same", "JJ"), ("other", "JJ"),
    ("quick", "JJ"), ("slow", "JJ"), ("brown", "JJ"), ("lazy", "JJ"), ("happy", "JJ"),
    ("sad", "JJ"), ("many", "JJ"), ("few", "JJ"), ("more", "JJR"), ("most", "JJS"),
    ("best", "JJS"), ("better", "JJR"),
    // common verbs
    ("go", "VB"), ("get", "VB"), ("make", "VB"), ("know", "VB"), ("think", "VB"),
    ("take", "VB"), ("see", "VB"), ("come", "VB"), ("want", "VBP"), ("use", "VB"),
    ("find", "VB"), ("give", "VB"), ("tell", "VB"), ("work", "NN"), ("call", "VB"),
    ("need", "VBP"), ("feel", "VB"), ("say", "VB"), ("said", "VBD"), ("went", "VBD"),
    ("made", "VBN"), ("got", "VBD"), ("took", "VBD"), ("saw", "VBD"), ("came", "VBD"),
    ("knew", "VBD"), ("thought", "VBD"), ("gave", "VBD"), ("found", "VBD"), ("run", "VB"),
    ("jumps", "VBZ"), ("runs", "VBZ"), ("uses", "VBZ"), ("makes", "VBZ"),
    ("needs", "VBZ"), ("wants", "VBZ"),
    // nouns and verbs that end like adjectives
    ("client", "NN"), ("content", "NN"), ("incident", "NN"), ("component", "NN"),
    ("student", "NN"), ("parent", "NN"), ("agent", "NN"), ("patient", "NN"),
    ("percent", "NN"), ("recipient", "NN"), ("president", "NN"), ("resident", "NN"),
    ("accident", "NN"), ("talent", "NN"), ("intent", "NN"), ("extent", "NN"),
    ("signal", "NN"), ("portal", "NN"), ("email", "NN"), ("approval", "NN"),
    ("proposal", "NN"), ("rental", "NN"), ("terminal", "NN"), ("manual", "NN"),
    ("journal", "NN"), ("animal", "NN"), ("hospital", "NN"), ("interval", "NN"),
    ("capital", "NN"), ("material", "NN"), ("arrival", "NN"), ("tutorial", "NN"),
    ("festival", "NN"), ("removal", "NN"), ("renewal", "NN"), ("referral", "NN"),
    ("trial", "NN"), ("withdrawal", "NN"), ("principal", "NN"), ("credential", "NN"),
    ("archive", "NN"), ("objective", "NN"), ("directive", "NN"), ("executive", "NN"),
    ("incentive", "NN"), ("initiative", "NN"), ("alternative", "NN"), ("motive", "NN"),
    ("representative", "NN"), ("perspective", "NN"), ("narrative", "NN"),
    ("variable", "NN"), ("deliverable", "NN"), ("vegetable", "NN"),
    ("drive", "VB"), ("live", "VB"), ("arrive", "VB"), ("derive", "VB"), ("survive", "VB"),
    ("thrive", "VB"), ("strive", "VB"), ("revive", "VB"), ("deprive", "VB"),
    // numbers
    ("one", "CD"), ("two", "CD"), ("three", "CD"), ("four", "CD"), ("five", "CD"),
    ("ten", "CD"), ("hundred", "CD"), ("thousand", "CD"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub token: String,
    pub tag: String,
}

impl TaggedWord {
    pub fn is_noun(&self) -> bool {
        self.tag.starts_with('N')
    }

    pub fn is_verb(&self) -> bool {
        self.tag.starts_with('V')
    }
}

pub struct PosTagger {
    lexicon: HashMap<String, String>,
    default_tag: String,
}

impl PosTagger {
    pub fn english() -> Self {
        Self::new(LEXICON.iter().copied(), DEFAULT_TAG)
    }

    pub fn new<'a>(lexicon: impl IntoIterator<Item = (&'a str, &'a str)>, default_tag: &str) -> Self {
        let lexicon = lexicon
            .into_iter()
            .map(|(word, tag)| (word.to_lowercase(), tag.to_string()))
            .collect();
        Self {
            lexicon,
            default_tag: default_tag.to_string(),
        }
    }

    /// Tags each sentence of `text` on its own, so the first word after a
    /// `.`, `!` or `?` is treated as a sentence opener.
    pub fn tag_text(&self, text: &str) -> Vec<TaggedWord> {
        text.split(['.', '!', '?'])
            .flat_map(|sentence| self.tag(&tokenize(sentence)))
            .collect()
    }

    /// Tags `tokens` as a single sentence.
    pub fn tag(&self, tokens: &[&str]) -> Vec<TaggedWord> {
        let mut tagged: Vec<TaggedWord> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| TaggedWord {
                token: token.to_string(),
                tag: self.initial_tag(token, i == 0),
            })
            .collect();
        apply_contextual_rules(&mut tagged);
        tagged
    }

    fn initial_tag(&self, token: &str, sentence_start: bool) -> String {
        if let Some(tag) = self.lexicon.get(&token.to_lowercase()) {
            return tag.clone();
        }
        self.guess_tag(token, sentence_start).to_string()
    }

    fn guess_tag<'a>(&'a self, token: &str, sentence_start: bool) -> &'a str {
        if token.chars().all(|c| c.is_ascii_digit()) {
            return "CD";
        }
        if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
            return "NNP";
        }
        let lower = token.to_lowercase();
        if is_adjective_shaped(&lower) {
            return "JJ";
        }
        if lower.len() > 3 {
            if lower.ends_with("ly") {
                return "RB";
            }
            if lower.ends_with("ing") {
                return "VBG";
            }
            if lower.ends_with("ed") {
                return "VBD";
            }
            if lower.ends_with('s') && !lower.ends_with("ss") {
                return "NNS";
            }
        }
        &self.default_tag
    }
}

fn is_adjective_shaped(word: &str) -> bool {
    if word.ends_with("ment") || word.ends_with("ieve") {
        return false;
    }
    ADJECTIVE_SUFFIXES
        .iter()
        .any(|suffix| word.len() > suffix.len() + 2 && word.ends_with(suffix))
}

fn is_form_of_have_or_be(token: &str) -> bool {
    matches!(
        token.to_lowercase().as_str(),
        "have" | "has" | "had" | "having" | "be" | "is" | "am" | "are" | "was" | "were" | "been" | "being"
    )
}

fn apply_contextual_rules(tagged: &mut [TaggedWord]) {
    for i in 1..tagged.len() {
        let (before, rest) = tagged.split_at_mut(i);
        let prev = &before[i - 1];
        let current = &mut rest[0];

        // "to run", "will work"
        if (prev.tag == "TO" || prev.tag == "MD") && current.is_noun() && current.tag != "NNP" {
            current.tag = "VB".to_string();
        }
        // "has finished", "was delayed"
        else if current.tag == "VBD" && is_form_of_have_or_be(&prev.token) {
            current.tag = "VBN".to_string();
        }
        // "the run", "a need"
        else if (current.tag == "VB" || current.tag == "VBP") && prev.tag == "DT" {
            current.tag = "NN".to_string();
        }
    }
}

/// Tokens tagged as a noun or a verb, in order, duplicates kept.
pub fn extract_entities(text: &str) -> Vec<String> {
    DEFAULT_TAGGER
        .tag_text(text)
        .into_iter()
        .filter(|word| word.is_noun() || word.is_verb())
        .map(|word| word.token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        let tokens = tokenize(text);
        PosTagger::english()
            .tag(&tokens)
            .into_iter()
            .map(|w| w.tag)
            .collect()
    }

    #[test]
    fn test_lexicon_and_default_tags() {
        assert_eq!(
            tags("The quick brown fox jumps over the lazy dog"),
            vec!["DT", "JJ", "JJ", "NN", "VBZ", "IN", "DT", "JJ", "NN"]
        );
    }

    #[test]
    fn test_unknown_word_shapes() {
        assert_eq!(
            tags("Reports arrived quickly from 42 Berlin offices"),
            vec!["NNS", "VBD", "RB", "IN", "CD", "NNP", "NNS"]
        );
    }

    #[test]
    fn test_verb_after_to_or_modal() {
        assert_eq!(tags("we need to deploy"), vec!["PRP", "VBP", "TO", "VB"]);
        assert_eq!(tags("it will work"), vec!["PRP", "MD", "VB"]);
    }

    #[test]
    fn test_participle_after_have() {
        assert_eq!(tags("the job has finished"), vec!["DT", "NN", "VBZ", "VBN"]);
    }

    #[test]
    fn test_noun_after_determiner() {
        assert_eq!(tags("the need"), vec!["DT", "NN"]);
    }

    #[test]
    fn test_extract_entities_keeps_nouns_and_verbs() {
        let entities = extract_entities("The quick brown fox jumps over the lazy dog");
        assert_eq!(entities, vec!["fox", "jumps", "dog"]);
    }

    #[test]
    fn test_extract_entities_keeps_duplicates_and_case() {
        let entities = extract_entities("Server logs show Server errors");
        assert_eq!(entities, vec!["Server", "logs", "show", "Server", "errors"]);
    }

    #[test]
    fn test_unknown_adjectives_by_suffix() {
        assert_eq!(
            tags("our reliable scalable service"),
            vec!["PRP$", "JJ", "JJ", "NN"]
        );
        assert_eq!(tags("a famous dangerous plan"), vec!["DT", "JJ", "JJ", "NN"]);
        // listed nouns and -ment words keep their noun tags
        assert_eq!(tags("the client deployment"), vec!["DT", "NN", "NN"]);
    }

    #[test]
    fn test_adjectives_are_not_entities() {
        assert_eq!(
            extract_entities("The excellent report was beautiful"),
            vec!["report", "was"]
        );
        assert_eq!(extract_entities("Our reliable scalable service"), vec!["service"]);
    }

    #[test]
    fn test_capitalized_sentence_opener_is_not_proper_noun() {
        let tagged = PosTagger::english().tag_text("The job failed. Quickly we fixed it");
        let quickly = tagged.iter().find(|w| w.token == "Quickly").unwrap();
        assert_eq!(quickly.tag, "RB");
        assert_eq!(
            extract_entities("The job failed. Quickly we fixed it"),
            vec!["job", "failed", "fixed"]
        );
    }

    #[test]
    fn test_mid_sentence_capital_is_still_proper_noun() {
        let tagged = PosTagger::english().tag_text("Alerts fired! Then Grafana paged us");
        let tags: Vec<&str> = tagged.iter().map(|w| w.tag.as_str()).collect();
        assert_eq!(tags, vec!["NNS", "VBD", "RB", "NNP", "VBD", "PRP"]);
    }

    #[test]
    fn test_custom_default_tag() {
        let tagger = PosTagger::new([("hello", "UH")], "FW");
        let tagged = tagger.tag(&["hello", "zzz"]);
        assert_eq!(tagged[0].tag, "UH");
        assert_eq!(tagged[1].tag, "FW");
    }
}
