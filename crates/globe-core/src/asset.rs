/// Load state of a cached asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AssetState {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Holds a loaded asset as an immutable template and hands out copies.
///
/// The template is stored once; [`AssetCache::instance`] clones it for each
/// consumer so per-instance mutation never reaches the template. Every store
/// bumps `generation`, which callers use as a cheap change key.
#[derive(Debug)]
pub struct AssetCache<T> {
    template: Option<T>,
    state: AssetState,
    generation: u64,
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self {
            template: None,
            state: AssetState::Loading,
            generation: 0,
        }
    }
}

impl<T: Clone> AssetCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, template: T) {
        self.template = Some(template);
        self.state = AssetState::Ready;
        self.generation += 1;
    }

    /// Record a failed load. A template that is already stored is kept.
    pub fn fail(&mut self) {
        if self.template.is_none() {
            self.state = AssetState::Failed;
        }
    }

    pub fn state(&self) -> AssetState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn template(&self) -> Option<&T> {
        self.template.as_ref()
    }

    pub fn instance(&self) -> Option<T> {
        self.template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_bumps_generation_and_instances_are_copies() {
        let mut cache = AssetCache::new();
        assert_eq!(cache.state(), AssetState::Loading);
        assert!(cache.instance().is_none());

        cache.store(vec![1, 2, 3]);
        assert_eq!(cache.generation(), 1);
        let mut copy = cache.instance().unwrap_or_default();
        copy.push(4);
        assert_eq!(cache.template(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn failure_after_success_keeps_template() {
        let mut cache = AssetCache::new();
        cache.fail();
        assert_eq!(cache.state(), AssetState::Failed);
        cache.store(1u8);
        cache.fail();
        assert_eq!(cache.state(), AssetState::Ready);
    }
}
