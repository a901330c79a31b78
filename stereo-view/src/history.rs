use serde::{Deserialize, Serialize};

/// В какой список ушла последняя фиксация.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoTag {
    Line,
    Angle,
}

/// Линейный стек отмены: только теги, сами аннотации живут в своих списках.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    undo: Vec<UndoTag>,
}

impl History {
    pub fn record(&mut self, tag: UndoTag) {
        self.undo.push(tag);
    }

    pub fn pop(&mut self) -> Option<UndoTag> {
        self.undo.pop()
    }

    pub fn last(&self) -> Option<UndoTag> {
        self.undo.last().copied()
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
    }

    pub fn tags(&self) -> &[UndoTag] {
        &self.undo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut h = History::default();
        h.record(UndoTag::Line);
        h.record(UndoTag::Angle);
        assert_eq!(h.last(), Some(UndoTag::Angle));
        assert_eq!(h.pop(), Some(UndoTag::Angle));
        assert_eq!(h.pop(), Some(UndoTag::Line));
        assert_eq!(h.pop(), None);
    }
}
