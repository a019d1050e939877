//! The tick driver: owns live contraptions and advances them.
//!
//! # Step
//!
//! Each [`ContraptionManager::step`]:
//! 1. **Advance** -- bump the tick counter.
//! 2. **Select** -- pick every contraption whose update interval has
//!    elapsed (factories every tick, generators every `period` seconds).
//! 3. **Update** -- run [`Contraption::update`] for the ticks elapsed since
//!    its last update, locking the inventory at its anchor for the whole
//!    update. With the `parallel` feature this runs on the rayon pool.
//! 4. **Report** -- return queued lifecycle events followed by the
//!    transition events of this step, in contraption order.

use crate::contraption::{Contraption, UpdateOutcome};
use crate::event::ContraptionEvent;
use crate::fixed::{Fixed64, Ticks};
use crate::id::ContraptionId;
use crate::item::ItemSet;
use crate::location::BlockLocation;
use crate::placement::{ContraptionRegistry, FeedbackSink, Response, create_contraption};
use crate::properties::ContraptionProperties;
use crate::world::WorldView;
use slotmap::SlotMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ContraptionManager {
    contraptions: SlotMap<ContraptionId, Contraption>,
    tick: Ticks,
    pending_events: Vec<ContraptionEvent>,
}

impl ContraptionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> Ticks {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.contraptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contraptions.is_empty()
    }

    pub fn get(&self, id: ContraptionId) -> Option<&Contraption> {
        self.contraptions.get(id)
    }

    pub fn get_mut(&mut self, id: ContraptionId) -> Option<&mut Contraption> {
        self.contraptions.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContraptionId, &Contraption)> {
        self.contraptions.iter()
    }

    /// The contraption anchored at `location`, if any.
    pub fn find_at(&self, location: BlockLocation) -> Option<ContraptionId> {
        self.contraptions
            .iter()
            .find(|(_, c)| c.anchor().location == location)
            .map(|(id, _)| id)
    }

    /// Build a contraption and register it here.
    pub fn create<W, F>(
        &mut self,
        properties: &Arc<ContraptionProperties>,
        location: BlockLocation,
        world: &W,
        feedback: &mut F,
    ) -> Response
    where
        W: WorldView + ?Sized,
        F: FeedbackSink + ?Sized,
    {
        create_contraption(properties, location, world, self, feedback)
    }

    /// Remove a contraption. Its construction cost is not refunded.
    pub fn unregister(&mut self, id: ContraptionId) -> Option<Contraption> {
        let removed = self.contraptions.remove(id)?;
        log::debug!("removed {} '{}'", removed.kind(), removed.properties().id());
        self.pending_events.push(ContraptionEvent::Removed {
            contraption: id,
            tick: self.tick,
        });
        Some(removed)
    }

    /// Run a factory's recipe once against the inventory at its anchor.
    pub fn run_production<W: WorldView + ?Sized>(&mut self, id: ContraptionId, world: &W) -> Option<ItemSet> {
        let contraption = self.contraptions.get_mut(id)?;
        let pool = world.inventory_at(contraption.anchor().location)?;
        let mut guard = pool.lock();
        contraption.run_production(&mut *guard)
    }

    /// Take stored output from a contraption. `None` if it does not exist.
    pub fn withdraw(&mut self, id: ContraptionId, amount: Fixed64) -> Option<Fixed64> {
        self.contraptions.get_mut(id).map(|c| c.withdraw(amount))
    }

    /// Advance one tick. See the module docs for the phases.
    pub fn step<W>(&mut self, world: &W) -> Vec<ContraptionEvent>
    where
        W: WorldView + Sync + ?Sized,
        W::Pool: Send,
    {
        self.tick += 1;
        let now = self.tick;

        let due: Vec<(ContraptionId, &mut Contraption)> = self
            .contraptions
            .iter_mut()
            .filter(|(_, c)| c.is_due(now))
            .collect();

        let transitions = update_all(due, world, now);

        let mut events = std::mem::take(&mut self.pending_events);
        events.extend(transitions);
        events
    }

    /// Run `steps` ticks and collect every event.
    pub fn run<W>(&mut self, world: &W, steps: u64) -> Vec<ContraptionEvent>
    where
        W: WorldView + Sync + ?Sized,
        W::Pool: Send,
    {
        (0..steps).flat_map(|_| self.step(world)).collect()
    }
}

impl ContraptionRegistry for ContraptionManager {
    fn register(&mut self, mut contraption: Contraption) -> ContraptionId {
        contraption.stamp(self.tick);
        let spec = contraption.properties().id().clone();
        let anchor = *contraption.anchor();
        let id = self.contraptions.insert(contraption);
        self.pending_events.push(ContraptionEvent::Created {
            contraption: id,
            spec,
            anchor,
            tick: self.tick,
        });
        id
    }

    fn occupied(&self, location: BlockLocation) -> bool {
        self.find_at(location).is_some()
    }
}

fn update_all<W>(due: Vec<(ContraptionId, &mut Contraption)>, world: &W, now: Ticks) -> Vec<ContraptionEvent>
where
    W: WorldView + Sync + ?Sized,
    W::Pool: Send,
{
    #[cfg(feature = "parallel")]
    {
        update_parallel(due, world, now)
    }
    #[cfg(not(feature = "parallel"))]
    {
        update_serial(due, world, now)
    }
}

#[cfg(feature = "parallel")]
fn update_parallel<W>(due: Vec<(ContraptionId, &mut Contraption)>, world: &W, now: Ticks) -> Vec<ContraptionEvent>
where
    W: WorldView + Sync + ?Sized,
    W::Pool: Send,
{
    use rayon::prelude::*;

    due.into_par_iter()
        .flat_map_iter(|(id, contraption)| update_one(id, contraption, world, now))
        .collect()
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn update_serial<W>(due: Vec<(ContraptionId, &mut Contraption)>, world: &W, now: Ticks) -> Vec<ContraptionEvent>
where
    W: WorldView + ?Sized,
{
    due.into_iter()
        .flat_map(|(id, contraption)| update_one(id, contraption, world, now))
        .collect()
}

fn update_one<W: WorldView + ?Sized>(
    id: ContraptionId,
    contraption: &mut Contraption,
    world: &W,
    now: Ticks,
) -> Vec<ContraptionEvent> {
    let elapsed = now - contraption.last_update();
    let outcome = match world.inventory_at(contraption.anchor().location) {
        Some(pool) => {
            let mut guard = pool.lock();
            contraption.update(elapsed, Some(&mut *guard))
        }
        None => contraption.update::<W::Pool>(elapsed, None),
    };
    contraption.mark_updated(now);
    transitions(id, contraption, &outcome, now)
}

fn transitions(
    id: ContraptionId,
    contraption: &Contraption,
    outcome: &UpdateOutcome,
    tick: Ticks,
) -> Vec<ContraptionEvent> {
    let bounds = contraption.properties().min_max_gadget();
    let mut events = Vec::new();

    if outcome.conversion.sets > 0 {
        events.push(ContraptionEvent::Converted {
            contraption: id,
            sets: outcome.conversion.sets,
            delta: outcome.conversion.delta,
            tick,
        });
    }
    if outcome.after == bounds.max() && outcome.before != bounds.max() {
        log::debug!("{} '{}' reached capacity", contraption.kind(), contraption.name());
        events.push(ContraptionEvent::ReachedCapacity { contraption: id, tick });
    }
    if outcome.after == bounds.min() && outcome.before != bounds.min() {
        log::debug!("{} '{}' depleted", contraption.kind(), contraption.name());
        events.push(ContraptionEvent::Depleted { contraption: id, tick });
    }
    events
}
