//! In-memory cache of the most recently fetched story list

use crate::api::Story;

/// Ordered story list, replaced wholesale on every fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryCollection {
    stories: Vec<Story>,
}

impl StoryCollection {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// Replace the whole list
    pub fn replace(&mut self, stories: Vec<Story>) {
        self.stories = stories;
    }

    /// Insert a freshly posted story at the top
    pub fn prepend(&mut self, story: Story) {
        self.stories.insert(0, story);
    }

    /// Remove a story by id, returning it if it was cached
    pub fn remove(&mut self, story_id: &str) -> Option<Story> {
        let pos = self.stories.iter().position(|s| s.story_id == story_id)?;
        Some(self.stories.remove(pos))
    }

    pub fn get(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.story_id == story_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Story> {
        self.stories.iter()
    }

    pub fn as_slice(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn clear(&mut self) {
        self.stories.clear();
    }
}

impl<'a> IntoIterator for &'a StoryCollection {
    type Item = &'a Story;
    type IntoIter = std::slice::Iter<'a, Story>;

    fn into_iter(self) -> Self::IntoIter {
        self.stories.iter()
    }
}
