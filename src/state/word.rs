use super::SessionEngine;
use rand::Rng;

impl SessionEngine {
    /// Set the secret word. A non-blank `value` is used as given (trimmed);
    /// otherwise a word is drawn from the word list. An empty list yields an
    /// empty word.
    pub fn set_word(&mut self, value: Option<&str>) -> &str {
        self.word = match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(word) => word.to_string(),
            None => self.choose_random_word(),
        };
        &self.word
    }

    fn choose_random_word(&mut self) -> String {
        if self.word_list.is_empty() {
            tracing::warn!("Word list is empty, no word chosen");
            return String::new();
        }

        let index = self.rng.random_range(0..self.word_list.len());
        self.word_list[index].trim().to_string()
    }
}
