//! Typed data binding.
//!
//! A [`Source`] is a shared, versioned cell; a [`BindingSet`] holds the
//! bindings that push source values into the tree. Each binding pairs a
//! version probe with an apply closure, so [`BindingSet::sync`] only
//! re-applies the bindings whose source actually changed. An apply
//! closure that fails is dropped from the set and logged; the rest keep
//! working.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;

use crate::control::HandlerResult;
use crate::tree::Tree;

struct Versioned<T> {
    value: T,
    version: u64,
}

/// A shared value that counts its writes.
pub struct Source<T> {
    inner: Rc<RefCell<Versioned<T>>>,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Source<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Versioned { value, version: 0 })),
        }
    }

    /// Replace the value and bump the version.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.borrow_mut();
        inner.value = value;
        inner.version += 1;
    }

    /// Mutate the value in place; counts as a write.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.borrow_mut();
        f(&mut inner.value);
        inner.version += 1;
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}

impl<T: Clone> Source<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }
}

struct Binding {
    name: String,
    /// Returns the source version, so the set can tell whether the
    /// binding needs a re-apply without knowing the value type.
    probe: Box<dyn Fn() -> u64>,
    applied: Option<u64>,
    apply: Box<dyn FnMut(&mut Tree) -> HandlerResult>,
}

/// The bindings owned by one view; call [`sync`](Self::sync) before
/// each refresh.
#[derive(Default)]
pub struct BindingSet {
    bindings: Vec<Binding>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a source to the tree. The closure receives the current
    /// value whenever the source version has moved since the last sync.
    pub fn bind<T: Clone + 'static>(
        &mut self,
        name: impl Into<String>,
        source: &Source<T>,
        mut apply: impl FnMut(&mut Tree, T) -> HandlerResult + 'static,
    ) {
        let probe_source = source.clone();
        let apply_source = source.clone();
        self.bindings.push(Binding {
            name: name.into(),
            probe: Box::new(move || probe_source.version()),
            applied: None,
            apply: Box::new(move |tree| apply(tree, apply_source.get())),
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Re-apply every binding whose source changed. Returns true when
    /// anything was applied. A failing binding is deactivated.
    pub fn sync(&mut self, tree: &mut Tree) -> bool {
        let mut applied = false;
        self.bindings.retain_mut(|binding| {
            let version = (binding.probe)();
            if binding.applied == Some(version) {
                return true;
            }
            match (binding.apply)(tree) {
                Ok(()) => {
                    binding.applied = Some(version);
                    applied = true;
                    true
                }
                Err(error) => {
                    warn!("binding '{}' failed and was removed: {error}", binding.name);
                    false
                }
            }
        });
        if applied {
            tree.mark_dirty();
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::SizePolicy;
    use crate::controls::TextView;
    use crate::tree::ControlId;

    fn label(tree: &mut Tree) -> ControlId {
        let view = tree.add(TextView::new(""));
        tree.set_width(view, SizePolicy::MaxByContent);
        view
    }

    fn text(tree: &Tree, id: ControlId) -> String {
        tree.behavior::<TextView>(id).text.clone()
    }

    #[test]
    fn test_sync_applies_initial_and_changed_values() {
        let mut tree = Tree::new();
        let view = label(&mut tree);
        let source = Source::new("one".to_string());
        let mut bindings = BindingSet::new();
        bindings.bind("label", &source, move |tree, value| {
            tree.update::<TextView, _>(view, |v| v.text = value);
            Ok(())
        });

        assert!(bindings.sync(&mut tree));
        assert_eq!(text(&tree, view), "one");

        // Unchanged source: nothing to do.
        assert!(!bindings.sync(&mut tree));

        source.set("two".to_string());
        assert!(bindings.sync(&mut tree));
        assert_eq!(text(&tree, view), "two");
    }

    #[test]
    fn test_sync_marks_tree_dirty() {
        let mut tree = Tree::new();
        let view = label(&mut tree);
        let source = Source::new(1);
        let mut bindings = BindingSet::new();
        bindings.bind("count", &source, move |tree, value: i32| {
            tree.update::<TextView, _>(view, |v| v.text = value.to_string());
            Ok(())
        });
        bindings.sync(&mut tree);
        tree.clear_dirty();
        bindings.sync(&mut tree);
        assert!(!tree.is_dirty());
        source.set(2);
        bindings.sync(&mut tree);
        assert!(tree.is_dirty());
    }

    #[test]
    fn test_failing_binding_is_deactivated() {
        let mut tree = Tree::new();
        let source = Source::new(0);
        let mut bindings = BindingSet::new();
        let mut calls = 0;
        bindings.bind("broken", &source, move |_, _: i32| {
            calls += 1;
            assert_eq!(calls, 1, "deactivated binding ran again");
            Err("boom".into())
        });
        bindings.sync(&mut tree);
        assert!(bindings.is_empty());
        source.set(1);
        bindings.sync(&mut tree);
    }

    #[test]
    fn test_update_counts_as_write() {
        let source = Source::new(vec![1, 2]);
        let before = source.version();
        source.update(|v| v.push(3));
        assert!(source.version() > before);
        assert_eq!(source.get(), vec![1, 2, 3]);
    }
}
