//! The per-tick engine
//!
//! One `tick` resolves all pending input, runs every stacked mode's
//! periodic hook, advances macro playback, and composes the display, in
//! that order. Input is fully resolved before composition, so a mode
//! switch triggered by a key event is visible in the same tick's frame.
//!
//! Stack mutations requested anywhere (key actions, mode hooks) go
//! through one queue and are applied between steps, never reentrantly.
//! The engine never panics on bad input or failing collaborators; every
//! problem is reported in the returned [`TickReport`] for the caller to
//! log.

use heapless::Vec;

use crate::action::StackRequest;
use crate::compose::Compositor;
use crate::dispatch::Dispatcher;
use crate::event::InputEvent;
use crate::grid::{KeyAddress, KeyGrid};
use crate::mode::{
    ConfigError, ModeContext, ModeId, ModeRegistry, ModeStack, RequestQueue, StackError, MAX_STACK,
};
use crate::traits::display::{DisplayError, DisplaySink};
use crate::traits::hid::{HidError, HidSink};
use crate::traits::keys::KeySource;

/// Upper bound on input events handled per tick; the rest stay queued in
/// the source for the next tick
pub const MAX_EVENTS_PER_TICK: u8 = 16;

/// Upper bound on stack mutations applied per drain, guarding against
/// hooks that request each other forever
pub const MAX_APPLIED_PER_DRAIN: u8 = 8;

/// Faults kept per tick report
pub const MAX_FAULTS: usize = 4;

/// One non-fatal problem encountered during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Configuration error (unknown mode, bad tables)
    Config(ConfigError),
    /// Rejected or rolled-back stack mutation
    Stack(StackError),
    /// HID transport error; the affected report was skipped
    Hid(HidError),
    /// Display error; the affected cells stay dirty and retry next tick
    Display(DisplayError),
    /// Input event referenced an address outside the grid
    OutOfBounds(KeyAddress),
    /// Queued stack requests were dropped to bound work per tick
    RequestsDropped(u8),
}

/// Outcome of one engine tick
///
/// Faults are bounded; overflowing faults are only counted. A clean
/// report has no faults at all.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Input events handled
    pub events: u8,
    /// Display cells drawn by the compositor
    pub cells_drawn: u8,
    /// Macros cancelled by mode switches
    pub macros_cancelled: u8,
    /// Problems encountered, oldest first
    pub faults: Vec<Fault, MAX_FAULTS>,
    /// Faults that did not fit in `faults`
    pub faults_dropped: u8,
}

impl TickReport {
    /// Whether the tick completed without any fault
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty() && self.faults_dropped == 0
    }

    fn record(&mut self, fault: Fault) {
        if self.faults.push(fault).is_err() {
            self.faults_dropped = self.faults_dropped.saturating_add(1);
        }
    }
}

/// Ties registry, stack, dispatcher and compositor into one tickable
/// unit
///
/// The engine owns the registry (and through it all mode instances) for
/// its lifetime; collaborator handles are borrowed per tick so the
/// caller keeps ownership of the hardware.
pub struct Engine<'m> {
    registry: ModeRegistry<'m>,
    stack: ModeStack,
    dispatcher: Dispatcher,
    compositor: Compositor,
    queue: RequestQueue,
}

impl<'m> Engine<'m> {
    /// Create an engine and activate the named initial mode
    ///
    /// Fails if the initial mode is unregistered or refuses to activate;
    /// the device must never start without an active mode. Requests the
    /// initial activation queues (a mode may immediately delegate to a
    /// submenu) are applied on the first tick.
    pub fn new(registry: ModeRegistry<'m>, initial: &str) -> Result<Self, Fault> {
        let grid = registry.grid();
        let mut engine = Self {
            registry,
            stack: ModeStack::new(),
            dispatcher: Dispatcher::new(),
            compositor: Compositor::new(grid),
            queue: RequestQueue::new(),
        };
        let id = engine
            .registry
            .lookup(initial)
            .ok_or(Fault::Config(ConfigError::UnknownMode))?;
        engine
            .stack
            .push(id, &mut engine.registry, &mut engine.queue)
            .map_err(Fault::Stack)?;
        Ok(engine)
    }

    /// The key grid this engine runs on
    pub fn grid(&self) -> KeyGrid {
        self.registry.grid()
    }

    /// Name of the active mode
    pub fn current_mode(&self) -> Option<&'static str> {
        self.stack
            .current()
            .map(|id| self.registry.info(id).name)
    }

    /// Number of stacked modes
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Run one tick: input, mode hooks, macro playback, composition
    pub fn tick(
        &mut self,
        elapsed_ms: u32,
        keys: &mut dyn KeySource,
        hid: &mut dyn HidSink,
        display: &mut dyn DisplaySink,
    ) -> TickReport {
        let mut report = TickReport::default();

        // Requests left over from boot-time activation hooks
        self.drain_requests(hid, &mut report);

        // Input, in detection order; requests drain after every event so
        // later events dispatch against the mode they would hit on-device
        let mut events = 0;
        while events < MAX_EVENTS_PER_TICK {
            let Some(event) = keys.poll() else {
                break;
            };
            events += 1;
            self.handle_event(event, hid, &mut report);
            self.drain_requests(hid, &mut report);
        }
        report.events = events;

        // Periodic hooks for every stacked mode, bottom to top. The
        // snapshot keeps iteration stable while hooks mutate the stack.
        let ids: Vec<ModeId, MAX_STACK> = self.stack.entries().iter().copied().collect();
        for id in ids {
            if !self.stack.contains(id) {
                continue;
            }
            {
                let (infos, modes) = self.registry.parts_mut();
                let mut ctx = ModeContext::new(&mut self.queue, infos);
                modes[id.index()].on_tick(&mut ctx, elapsed_ms);
            }
            self.drain_requests(hid, &mut report);
        }

        // Advance in-flight macros
        if let Err(e) = self.dispatcher.tick(elapsed_ms, hid) {
            report.record(Fault::Hid(e));
        }

        // Compose the frame from the now-current top mode
        if let Some(top) = self.stack.current() {
            let (_, modes) = self.registry.parts_mut();
            let mode = &*modes[top.index()];
            let icons = mode.icon_table();
            let (drawn, err) = self.compositor.compose(mode.title(), &icons, display);
            report.cells_drawn = drawn;
            if let Some(e) = err {
                report.record(Fault::Display(e));
            }
        }

        report
    }

    fn handle_event(&mut self, event: InputEvent, hid: &mut dyn HidSink, report: &mut TickReport) {
        match event {
            InputEvent::KeyDown(addr) => self.handle_key(addr, true, hid, report),
            InputEvent::KeyUp(addr) => self.handle_key(addr, false, hid, report),
            InputEvent::EncoderCw | InputEvent::EncoderCcw => {
                let delta = event.rotation_delta();
                if let Some(top) = self.stack.current() {
                    let (infos, modes) = self.registry.parts_mut();
                    let mut ctx = ModeContext::new(&mut self.queue, infos);
                    modes[top.index()].on_encoder(&mut ctx, delta);
                }
            }
        }
    }

    fn handle_key(
        &mut self,
        addr: KeyAddress,
        pressed: bool,
        hid: &mut dyn HidSink,
        report: &mut TickReport,
    ) {
        if !self.registry.grid().contains(addr) {
            debug_assert!(false, "key event outside grid");
            report.record(Fault::OutOfBounds(addr));
            return;
        }
        let Some(top) = self.stack.current() else {
            return;
        };

        let action = {
            let (infos, modes) = self.registry.parts_mut();
            let mode = &mut *modes[top.index()];
            let mut ctx = ModeContext::new(&mut self.queue, infos);
            if mode.on_key(&mut ctx, addr, pressed) {
                None
            } else {
                // An unmapped key is a silent no-op, not an error
                mode.action_table()
                    .get(addr)
                    .and_then(|binding| binding.for_edge(pressed))
                    .cloned()
            }
        };

        if let Some(action) = action {
            if let Err(e) = self.dispatcher.run(&action, addr, hid, &mut self.queue) {
                report.record(Fault::Hid(e));
            }
        }
    }

    /// Apply queued stack requests in order
    ///
    /// Each applied mutation may queue more requests from its hooks;
    /// those are applied in turn, up to a bound. A mutation that changes
    /// the active mode cancels all in-flight macros so the host never
    /// keeps keys held for a mode that is no longer on top.
    fn drain_requests(&mut self, hid: &mut dyn HidSink, report: &mut TickReport) {
        let mut applied = 0;
        while let Some(request) = self.queue.pop_front() {
            if applied >= MAX_APPLIED_PER_DRAIN {
                let mut dropped = 1u8;
                while self.queue.pop_front().is_some() {
                    dropped = dropped.saturating_add(1);
                }
                report.record(Fault::RequestsDropped(dropped));
                break;
            }
            applied += 1;

            match self.apply(request) {
                Ok(()) => {
                    // The old top was deactivated by the mutation; its
                    // macros must not keep keys held on the host.
                    report.macros_cancelled = report
                        .macros_cancelled
                        .saturating_add(self.dispatcher.cancel_all(hid));
                }
                Err(fault) => report.record(fault),
            }
        }

        let dropped = self.queue.take_dropped();
        if dropped > 0 {
            report.record(Fault::RequestsDropped(dropped));
        }
    }

    fn apply(&mut self, request: StackRequest) -> Result<(), Fault> {
        match request {
            StackRequest::Push(name) => {
                let id = self.lookup(name)?;
                self.stack
                    .push(id, &mut self.registry, &mut self.queue)
                    .map_err(Fault::Stack)
            }
            StackRequest::Pop => self
                .stack
                .pop(&mut self.registry, &mut self.queue)
                .map_err(Fault::Stack),
            StackRequest::Replace(name) => {
                let id = self.lookup(name)?;
                self.stack
                    .replace(id, &mut self.registry, &mut self.queue)
                    .map_err(Fault::Stack)
            }
            StackRequest::Reset(name) => {
                let id = self.lookup(name)?;
                self.stack
                    .reset(id, &mut self.registry, &mut self.queue)
                    .map_err(Fault::Stack)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<ModeId, Fault> {
        self.registry
            .lookup(name)
            .ok_or(Fault::Config(ConfigError::UnknownMode))
    }
}
