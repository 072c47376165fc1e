// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A fixed-capacity reuse pool of drawable ray handles.
//!
//! The pool exists so the steady-state draw path allocates nothing: handles
//! are instantiated once through the injected factory, handed out per frame,
//! and hidden rather than destroyed when a frame needs fewer of them.
//!
//! Each frame runs a two-phase reset around the draw pass:
//! 1. [`RayObjectPool::mark_all_unused`] logically frees every handle but
//!    leaves it visible, so a handle reused for a different ray this frame
//!    never flickers invisible between frames;
//! 2. drawing [`RayObjectPool::acquire`]s handles as needed, growing the pool
//!    when the forest outgrows it (amortized; the pool never shrinks);
//! 3. [`RayObjectPool::deactivate_unused`] hides every handle that was not
//!    re-acquired, which is how pruned subtrees and newly hidden rays
//!    disappear from the screen.

use aktis_core::{DrawableFactory, RayDrawable};

struct Slot {
    drawable: Box<dyn RayDrawable>,
    in_use: bool,
}

/// The reuse pool of drawable ray handles.
pub struct RayObjectPool {
    slots: Vec<Slot>,
    // First slot not yet handed out this frame; reset by mark_all_unused.
    cursor: usize,
}

impl RayObjectPool {
    /// Creates a pool pre-warmed with `initial_size` handles.
    pub fn new(factory: &dyn DrawableFactory, initial_size: usize) -> Self {
        let mut slots = Vec::with_capacity(initial_size);
        for _ in 0..initial_size {
            slots.push(Slot {
                drawable: factory.instantiate(),
                in_use: false,
            });
        }
        log::debug!("Ray object pool warmed with {initial_size} handles.");
        Self { slots, cursor: 0 }
    }

    /// Logically frees every handle without hiding it. Call once per frame,
    /// before any drawing.
    pub fn mark_all_unused(&mut self) {
        for slot in &mut self.slots {
            slot.in_use = false;
        }
        self.cursor = 0;
    }

    /// Hands out the next free handle, making it visible and marking it
    /// in-use. Grows the pool through the factory when exhausted.
    pub fn acquire(&mut self, factory: &dyn DrawableFactory) -> &mut dyn RayDrawable {
        if self.cursor == self.slots.len() {
            self.slots.push(Slot {
                drawable: factory.instantiate(),
                in_use: false,
            });
            log::debug!("Ray object pool grew to {} handles.", self.slots.len());
        }
        let slot = &mut self.slots[self.cursor];
        self.cursor += 1;
        slot.in_use = true;
        slot.drawable.set_visible(true);
        &mut *slot.drawable
    }

    /// Hides every handle still marked free. Call once per frame, after all
    /// drawing.
    pub fn deactivate_unused(&mut self) {
        for slot in &mut self.slots {
            if !slot.in_use {
                slot.drawable.set_visible(false);
            }
        }
    }

    /// The total number of handles the pool holds, used or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The number of handles handed out since the last
    /// [`Self::mark_all_unused`].
    pub fn in_use(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aktis_core::{LinearRgba, Ray, RayKind, RayMaterial, Vec3};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    /// Records visibility flips and draw calls per handle.
    #[derive(Default)]
    struct Journal {
        instantiated: usize,
        visibility: Vec<(usize, bool)>,
    }

    struct TestDrawable {
        index: usize,
        journal: Rc<RefCell<Journal>>,
    }

    impl RayDrawable for TestDrawable {
        fn set_visible(&mut self, visible: bool) {
            self.journal.borrow_mut().visibility.push((self.index, visible));
        }

        fn draw(
            &mut self,
            ray: &Ray,
            _material: &Arc<RayMaterial>,
            _radius: f32,
            max_length: f32,
        ) -> f32 {
            ray.draw_length(10.0).min(max_length)
        }
    }

    struct TestFactory {
        journal: Rc<RefCell<Journal>>,
    }

    impl DrawableFactory for TestFactory {
        fn instantiate(&self) -> Box<dyn RayDrawable> {
            let mut journal = self.journal.borrow_mut();
            let index = journal.instantiated;
            journal.instantiated += 1;
            Box::new(TestDrawable {
                index,
                journal: self.journal.clone(),
            })
        }
    }

    fn setup(initial: usize) -> (RayObjectPool, TestFactory, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let factory = TestFactory {
            journal: journal.clone(),
        };
        let pool = RayObjectPool::new(&factory, initial);
        (pool, factory, journal)
    }

    #[test]
    fn warm_pool_does_not_grow_within_capacity() {
        let (mut pool, factory, journal) = setup(4);
        assert_eq!(journal.borrow().instantiated, 4);

        pool.mark_all_unused();
        for _ in 0..4 {
            pool.acquire(&factory);
        }
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.in_use(), 4);
        assert_eq!(journal.borrow().instantiated, 4);
    }

    #[test]
    fn exhausted_pool_grows_and_never_shrinks() {
        let (mut pool, factory, journal) = setup(2);

        pool.mark_all_unused();
        for _ in 0..5 {
            pool.acquire(&factory);
        }
        assert_eq!(pool.capacity(), 5);
        assert_eq!(journal.borrow().instantiated, 5);

        // A later, smaller frame keeps the grown capacity.
        pool.mark_all_unused();
        pool.acquire(&factory);
        pool.deactivate_unused();
        assert_eq!(pool.capacity(), 5);
    }

    #[test]
    fn two_phase_reset_hides_only_unacquired_handles() {
        let (mut pool, factory, journal) = setup(3);

        pool.mark_all_unused();
        pool.acquire(&factory);
        pool.acquire(&factory);
        journal.borrow_mut().visibility.clear();
        pool.deactivate_unused();

        // Only the third handle is hidden; the two acquired ones stay shown.
        assert_eq!(journal.borrow().visibility, vec![(2, false)]);
    }

    #[test]
    fn reused_handle_is_never_hidden_between_frames() {
        let (mut pool, factory, journal) = setup(1);

        pool.mark_all_unused();
        pool.acquire(&factory);
        pool.deactivate_unused();

        // Second frame reuses the same handle for (conceptually) a different ray.
        pool.mark_all_unused();
        pool.acquire(&factory);
        pool.deactivate_unused();

        let hidden = journal
            .borrow()
            .visibility
            .iter()
            .any(|&(_, visible)| !visible);
        assert!(!hidden, "an in-use handle must never be hidden");
    }
}
