use {crate::PipelineError, std::collections::VecDeque};

/// Fixed-capacity FIFO history, oldest entry first.
///
/// The capacity is chosen at construction and never changes. Pushing into a
/// full window evicts exactly the oldest entry.
#[derive(Debug, Clone)]
pub struct Window<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> Window<T> {
    /// Fails with `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, PipelineError> {
        if capacity == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "window capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append `entry`, returning the evicted oldest entry if the window was
    /// full.
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed entry.
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Clone> Window<T> {
    /// Copy of the contents, oldest first. Changing the copy does not touch
    /// the window.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

/// Mean intensity of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub frame_index: u64,
    pub value: f64,
}

impl Reading {
    pub fn new(frame_index: u64, value: f64) -> Self {
        Self { frame_index, value }
    }
}

/// Side of the threshold a reading falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Below,
    Above,
}

impl Tag {
    /// `Below` iff `value < threshold`. A value equal to the threshold is
    /// `Above`.
    pub fn classify(value: f64, threshold: f64) -> Self {
        if value < threshold { Tag::Below } else { Tag::Above }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedReading {
    pub frame_index: u64,
    pub value: f64,
    pub tag: Tag,
}

/// How the newest reading relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    None,
    /// Dropped below the threshold (or the first reading is below it).
    FellBelow,
    /// Came back to or over the threshold.
    RoseAbove,
}

impl Crossing {
    pub fn between(previous: Option<Tag>, current: Tag) -> Self {
        match (previous, current) {
            (Some(Tag::Below), Tag::Below) | (Some(Tag::Above) | None, Tag::Above) => Crossing::None,
            (Some(Tag::Above) | None, Tag::Below) => Crossing::FellBelow,
            (Some(Tag::Below), Tag::Above) => Crossing::RoseAbove,
        }
    }
}

impl Window<Reading> {
    /// Tag every reading against `threshold`, oldest first. Every reading in
    /// the window appears in the result exactly once.
    pub fn classify(&self, threshold: f64) -> Vec<ClassifiedReading> {
        self.entries
            .iter()
            .map(|reading| ClassifiedReading {
                frame_index: reading.frame_index,
                value: reading.value,
                tag: Tag::classify(reading.value, threshold),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_table() {
        assert_eq!(Crossing::between(None, Tag::Below), Crossing::FellBelow);
        assert_eq!(Crossing::between(None, Tag::Above), Crossing::None);
        assert_eq!(Crossing::between(Some(Tag::Above), Tag::Below), Crossing::FellBelow);
        assert_eq!(Crossing::between(Some(Tag::Below), Tag::Below), Crossing::None);
        assert_eq!(Crossing::between(Some(Tag::Below), Tag::Above), Crossing::RoseAbove);
        assert_eq!(Crossing::between(Some(Tag::Above), Tag::Above), Crossing::None);
    }

    #[test]
    fn test_push_reports_eviction_only_when_full() {
        let mut window = Window::new(2).unwrap();
        assert_eq!(window.push('a'), None);
        assert_eq!(window.push('b'), None);
        assert!(window.is_full());
        assert_eq!(window.push('c'), Some('a'));
        assert_eq!(window.latest(), Some(&'c'));
    }
}
