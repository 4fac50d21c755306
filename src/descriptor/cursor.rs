//! Read-only or writable handle onto a node of the descriptor tree.
//!
//! The same traversal serves every mode. In validate-only mode it walks
//! `Cursor::Read` handles, so the tree cannot be mutated; generation modes walk
//! `Cursor::Write` handles and patch identity fields in place.

pub enum Cursor<'a, T> {
    Read(&'a T),
    Write(&'a mut T),
}

impl<'a, T> Cursor<'a, T> {
    pub fn get(&self) -> &T {
        match self {
            Cursor::Read(node) => *node,
            Cursor::Write(node) => &**node,
        }
    }

    /// `None` for read-only handles.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Cursor::Read(_) => None,
            Cursor::Write(node) => Some(&mut **node),
        }
    }

    /// Handle onto a child field, borrowing from this one.
    pub fn field<U>(
        &mut self,
        read: fn(&T) -> &U,
        write: fn(&mut T) -> &mut U,
    ) -> Cursor<'_, U> {
        match self {
            Cursor::Read(node) => Cursor::Read(read(*node)),
            Cursor::Write(node) => Cursor::Write(write(&mut **node)),
        }
    }

    /// Handle onto an optional child, `None` when the child is absent.
    pub fn optional<U>(
        &mut self,
        read: fn(&T) -> &Option<U>,
        write: fn(&mut T) -> &mut Option<U>,
    ) -> Option<Cursor<'_, U>> {
        match self {
            Cursor::Read(node) => read(*node).as_ref().map(Cursor::Read),
            Cursor::Write(node) => write(&mut **node).as_mut().map(Cursor::Write),
        }
    }

    /// Handles onto every element of a child sequence.
    pub fn items<U>(
        &mut self,
        read: fn(&T) -> &Vec<U>,
        write: fn(&mut T) -> &mut Vec<U>,
    ) -> Vec<Cursor<'_, U>> {
        self.field(read, write).into_items()
    }
}

impl<'a, U> Cursor<'a, Vec<U>> {
    pub fn into_items(self) -> Vec<Cursor<'a, U>> {
        match self {
            Cursor::Read(items) => items.iter().map(Cursor::Read).collect(),
            Cursor::Write(items) => items.iter_mut().map(Cursor::Write).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Parent {
        label: String,
        child: Option<String>,
        items: Vec<u32>,
    }

    #[test]
    fn test_read_cursor_never_yields_mutable_access() {
        let parent = Parent::default();
        let mut cursor = Cursor::Read(&parent);
        assert!(cursor.get_mut().is_none());
        assert!(cursor.optional(|p| &p.child, |p| &mut p.child).is_none());
    }

    #[test]
    fn test_write_cursor_reaches_nested_fields() {
        let mut parent = Parent {
            child: Some("a".into()),
            items: vec![1, 2, 3],
            ..Default::default()
        };
        {
            let mut cursor = Cursor::Write(&mut parent);
            if let Some(label) = cursor.field(|p| &p.label, |p| &mut p.label).get_mut() {
                label.push_str("root");
            }
            if let Some(mut child) = cursor.optional(|p| &p.child, |p| &mut p.child) {
                if let Some(c) = child.get_mut() {
                    c.push('b');
                }
            }
            for mut item in cursor.items(|p| &p.items, |p| &mut p.items) {
                if let Some(v) = item.get_mut() {
                    *v *= 10;
                }
            }
        }
        assert_eq!(parent.label, "root");
        assert_eq!(parent.child.as_deref(), Some("ab"));
        assert_eq!(parent.items, vec![10, 20, 30]);
    }
}
