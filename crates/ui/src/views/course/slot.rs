/// Holder for a value that is lent out across awaits.
///
/// Every `install` starts a new generation. A lease taken before the latest
/// install is refused on return, so a late action cannot overwrite a
/// controller mounted while it was out.
pub(super) struct ControllerSlot<T> {
    current: Option<T>,
    generation: u64,
}

/// A value out on loan, tagged with the generation it was taken from.
pub(super) struct Lease<T> {
    pub(super) value: T,
    generation: u64,
}

impl<T> Default for ControllerSlot<T> {
    fn default() -> Self {
        Self {
            current: None,
            generation: 0,
        }
    }
}

impl<T> ControllerSlot<T> {
    /// Replace whatever is held or lent out with a fresh value.
    pub(super) fn install(&mut self, value: T) {
        self.generation += 1;
        self.current = Some(value);
    }

    pub(super) fn lease(&mut self) -> Option<Lease<T>> {
        self.current.take().map(|value| Lease {
            value,
            generation: self.generation,
        })
    }

    /// Put a lease back. Returns false and drops it if a newer value was
    /// installed meanwhile.
    pub(super) fn give_back(&mut self, lease: Lease<T>) -> bool {
        if lease.generation != self.generation {
            return false;
        }
        self.current = Some(lease.value);
        true
    }

    pub(super) fn is_stale(&self, lease: &Lease<T>) -> bool {
        lease.generation != self.generation
    }
}
