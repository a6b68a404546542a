use std::{cell::Cell, rc::Rc};

use crate::{
    config::SimConfig,
    core::Simulation,
    error::SurfaceError,
    render::{self, Canvas, FrameReport},
    scene::SceneInput,
    surface::{ResizeHub, SurfaceManager},
    types::{Particle, SurfaceSize},
};

/// Stop flag shared between the scheduler and whoever may end the loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Drawn(FrameReport),
    /// Container currently has no area; nothing simulated or drawn.
    Skipped,
    Stopped,
}

struct Active {
    sim: Simulation,
    surface: SurfaceManager,
    token: CancelToken,
}

/// Drives the particle layer: inactive → active → inactive.
pub struct Scheduler {
    config: SimConfig,
    active: Option<Active>,
}

impl Scheduler {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Token for the current activation. Cancelling it stops the loop at the next frame.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.active.as_ref().map(|a| a.token.clone())
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.active {
            Some(active) => active.sim.particles(),
            None => &[],
        }
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.active.as_ref().map(|a| a.surface.size())
    }

    /// Starts the loop on `canvas`. A missing or unusable surface leaves the
    /// scheduler inactive; the reason is logged, never returned.
    pub fn activate<C: Canvas>(
        &mut self,
        canvas: Option<&mut C>,
        measured: Option<SurfaceSize>,
        hub: &ResizeHub,
    ) -> bool {
        if self.active.is_some() {
            return true;
        }
        match self.try_activate(canvas, measured, hub) {
            Ok(active) => {
                let size = active.surface.size();
                log::info!(
                    "particle layer active: {} particles on {}x{}",
                    active.sim.particles().len(),
                    size.width,
                    size.height
                );
                self.active = Some(active);
                true
            }
            Err(err) => {
                log::warn!("particle layer disabled: {err}");
                false
            }
        }
    }

    fn try_activate<C: Canvas>(
        &self,
        canvas: Option<&mut C>,
        measured: Option<SurfaceSize>,
        hub: &ResizeHub,
    ) -> Result<Active, SurfaceError> {
        let size = measured.ok_or(SurfaceError::Unmeasurable)?;
        if !size.has_area() {
            return Err(SurfaceError::ZeroArea {
                width: size.width,
                height: size.height,
            });
        }
        let canvas = canvas.ok_or(SurfaceError::NoContext)?;
        canvas.resize(size);
        Ok(Active {
            sim: Simulation::from_config(&self.config, size),
            surface: SurfaceManager::attach(size, hub),
            token: CancelToken::new(),
        })
    }

    /// One paint-synchronized step: refresh size, tick every particle, draw once.
    pub fn frame<C: Canvas>(
        &mut self,
        now_ms: f64,
        scene: &SceneInput,
        canvas: &mut C,
    ) -> FrameStatus {
        let cancelled = match &self.active {
            Some(active) => active.token.is_cancelled(),
            None => return FrameStatus::Stopped,
        };
        if cancelled {
            self.deactivate();
            return FrameStatus::Stopped;
        }
        let Some(active) = self.active.as_mut() else {
            return FrameStatus::Stopped;
        };

        let size = active.surface.size();
        if active.sim.bounds() != size {
            active.sim.set_bounds(size);
        }
        if canvas.size() != size {
            canvas.resize(size);
        }
        if !size.has_area() {
            return FrameStatus::Skipped;
        }

        active.sim.tick(scene);
        FrameStatus::Drawn(render::draw_frame(
            canvas,
            active.sim.particles(),
            scene,
            size,
            now_ms,
        ))
    }

    /// Stops scheduling and detaches the resize listener in one step.
    pub fn deactivate(&mut self) {
        if let Some(mut active) = self.active.take() {
            active.token.cancel();
            active.surface.detach();
            log::info!("particle layer stopped");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.deactivate();
    }
}
