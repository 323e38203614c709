//! Minimal module domain registry, the external collaborator resolved
//! against by reference-collection settings.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use settings::NameResolver;

/// One toggleable client feature. Identity is the stable `id`; the display
/// name may be localized and never appears in persisted data.
#[derive(Debug)]
pub struct Module {
    pub id: String,
    pub name: String,
    active: Cell<bool>,
}

impl Module {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

/// Registry of all known modules. Cloning shares the underlying registry so
/// a handle can be captured by reference-list codecs.
#[derive(Clone, Default)]
pub struct Modules {
    inner: Rc<RefCell<Vec<Rc<Module>>>>,
}

impl Modules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module. A duplicate id is a startup bug and panics.
    pub fn register(&self, id: impl Into<String>, name: impl Into<String>) -> Rc<Module> {
        let id = id.into();
        let mut inner = self.inner.borrow_mut();
        assert!(
            inner.iter().all(|module| module.id != id),
            "duplicate module id '{id}'"
        );

        let module = Rc::new(Module {
            id,
            name: name.into(),
            active: Cell::new(false),
        });
        inner.push(module.clone());
        module
    }

    pub fn get(&self, id: &str) -> Option<Rc<Module>> {
        self.inner
            .borrow()
            .iter()
            .find(|module| module.id == id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Rc<Module>> {
        self.inner.borrow().clone()
    }

    pub fn active(&self) -> Vec<Rc<Module>> {
        self.inner
            .borrow()
            .iter()
            .filter(|module| module.is_active())
            .cloned()
            .collect()
    }
}

impl NameResolver<Rc<Module>> for Modules {
    fn resolve(&self, id: &str) -> Option<Rc<Module>> {
        self.get(id)
    }

    fn identify(&self, module: &Rc<Module>) -> String {
        module.id.clone()
    }
}
