//! A backend that records paint calls instead of rasterizing.
//!
//! Useful for testing code that drives a [`GraphicsContext`](crate::GraphicsContext):
//! every paint operation is captured together with the device-space path it
//! would have painted, and any call can be made to fail once.

use crate::backend::{Backend, BackendError, BackendResult, BackendStatus, Pattern};
use crate::geometry::{AffineTransform, Point, Rect, Size};
use crate::image::Image;
use crate::path::Path;
use crate::style::{FillRule, StrokeStyle};

/// Identifier of a recorded offscreen group.
pub type GroupId = usize;

/// Alpha mask of a recorded group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedMask {
    pub group: GroupId,
    pub padding: f64,
}

/// A recorded paint call. Paths are in device space.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fill {
        pattern: Pattern<GroupId>,
        rule: FillRule,
        path: Path,
    },
    Stroke {
        pattern: Pattern<GroupId>,
        style: StrokeStyle,
        transform: AffineTransform,
        path: Path,
    },
    Clip {
        rule: FillRule,
        path: Path,
    },
    Clear(Rect),
    Paint {
        pattern: Pattern<GroupId>,
        alpha: f64,
    },
    PushGroup,
    PopGroup(GroupId),
    AlphaMask(RecordedMask),
    Mask {
        pattern: Pattern<GroupId>,
        mask: RecordedMask,
        offset: Size,
    },
    DrawImage {
        width: u32,
        height: u32,
        rect: Rect,
        transform: AffineTransform,
        alpha: f64,
    },
}

#[derive(Debug, Clone)]
struct RecordedState {
    transform: AffineTransform,
}

/// Backend that keeps a log of [`Command`]s.
#[derive(Debug)]
pub struct RecordingBackend {
    state: RecordedState,
    state_stack: Vec<RecordedState>,
    path: Path,
    open_groups: Vec<GroupId>,
    next_group: GroupId,
    commands: Vec<Command>,
    failure: Option<(&'static str, BackendStatus)>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            state: RecordedState {
                transform: AffineTransform::IDENTITY,
            },
            state_stack: Vec::new(),
            path: Path::new(),
            open_groups: Vec::new(),
            next_group: 0,
            commands: Vec::new(),
            failure: None,
        }
    }

    /// Recorded paint calls, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Number of backend states currently saved.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Number of groups currently open.
    pub fn group_depth(&self) -> usize {
        self.open_groups.len()
    }

    /// Make the next call to `operation` fail with `status`.
    pub fn fail_next(&mut self, operation: &'static str, status: BackendStatus) {
        self.failure = Some((operation, status));
    }

    fn check(&mut self, operation: &'static str) -> BackendResult<()> {
        match self.failure {
            Some((op, status)) if op == operation => {
                self.failure = None;
                Err(BackendError::new(operation, status))
            }
            _ => Ok(()),
        }
    }

    fn device(&self, point: Point) -> Point {
        point.applying(&self.state.transform)
    }

    fn take_or_clone_path(&mut self, preserve: bool) -> Path {
        if preserve {
            self.path.clone()
        } else {
            std::mem::take(&mut self.path)
        }
    }
}

impl Backend for RecordingBackend {
    type Surface = GroupId;
    type Mask = RecordedMask;

    fn save(&mut self) -> BackendResult<()> {
        self.check("save")?;
        self.state_stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> BackendResult<()> {
        self.check("restore")?;
        self.state = self
            .state_stack
            .pop()
            .ok_or(BackendError::new("restore", BackendStatus::InvalidRestore))?;
        Ok(())
    }

    fn transform(&self) -> AffineTransform {
        self.state.transform
    }

    fn concat_transform(&mut self, transform: &AffineTransform) -> BackendResult<()> {
        self.check("concat_transform")?;
        let combined = transform.concatenating(&self.state.transform);
        if combined.inverted().is_none() {
            return Err(BackendError::new(
                "concat_transform",
                BackendStatus::InvalidMatrix,
            ));
        }
        self.state.transform = combined;
        Ok(())
    }

    fn new_path(&mut self) {
        self.path = Path::new();
    }

    fn move_to(&mut self, point: Point) {
        let point = self.device(point);
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        let point = self.device(point);
        if self.path.current_point().is_none() {
            self.path.move_to(point);
        } else {
            self.path.add_line(point);
        }
    }

    fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        let (control1, control2, end) = (self.device(control1), self.device(control2), self.device(end));
        if self.path.current_point().is_none() {
            self.path.move_to(control1);
        }
        self.path.add_curve(control1, control2, end);
    }

    fn close_path(&mut self) {
        if self.path.current_point().is_some() {
            self.path.close_subpath();
        }
    }

    fn current_point(&self) -> Option<Point> {
        let inverse = self.state.transform.inverted()?;
        self.path.current_point().map(|p| p.applying(&inverse))
    }

    fn copy_path(&self) -> Path {
        match self.state.transform.inverted() {
            Some(inverse) => self.path.applying(&inverse),
            None => Path::new(),
        }
    }

    fn fill(
        &mut self,
        pattern: &Pattern<GroupId>,
        rule: FillRule,
        preserve: bool,
    ) -> BackendResult<()> {
        self.check("fill")?;
        let path = self.take_or_clone_path(preserve);
        self.commands.push(Command::Fill {
            pattern: pattern.clone(),
            rule,
            path,
        });
        Ok(())
    }

    fn stroke(
        &mut self,
        pattern: &Pattern<GroupId>,
        style: &StrokeStyle,
        preserve: bool,
    ) -> BackendResult<()> {
        self.check("stroke")?;
        let path = self.take_or_clone_path(preserve);
        self.commands.push(Command::Stroke {
            pattern: pattern.clone(),
            style: style.clone(),
            transform: self.state.transform,
            path,
        });
        Ok(())
    }

    fn clip(&mut self, rule: FillRule) -> BackendResult<()> {
        self.check("clip")?;
        let path = std::mem::take(&mut self.path);
        self.commands.push(Command::Clip { rule, path });
        Ok(())
    }

    fn clear(&mut self, rect: Rect) -> BackendResult<()> {
        self.check("clear")?;
        self.commands.push(Command::Clear(rect));
        Ok(())
    }

    fn paint(&mut self, pattern: &Pattern<GroupId>, alpha: f64) -> BackendResult<()> {
        self.check("paint")?;
        self.commands.push(Command::Paint {
            pattern: pattern.clone(),
            alpha,
        });
        Ok(())
    }

    fn push_group(&mut self) -> BackendResult<()> {
        self.check("push_group")?;
        self.open_groups.push(self.next_group);
        self.next_group += 1;
        self.commands.push(Command::PushGroup);
        Ok(())
    }

    fn pop_group(&mut self) -> BackendResult<GroupId> {
        self.check("pop_group")?;
        let group = self
            .open_groups
            .pop()
            .ok_or(BackendError::new("pop_group", BackendStatus::InvalidPopGroup))?;
        self.commands.push(Command::PopGroup(group));
        Ok(group)
    }

    fn alpha_mask(&mut self, surface: &GroupId, padding: f64) -> BackendResult<RecordedMask> {
        self.check("alpha_mask")?;
        let mask = RecordedMask {
            group: *surface,
            padding,
        };
        self.commands.push(Command::AlphaMask(mask));
        Ok(mask)
    }

    fn mask(
        &mut self,
        pattern: &Pattern<GroupId>,
        mask: &RecordedMask,
        offset: Size,
    ) -> BackendResult<()> {
        self.check("mask")?;
        self.commands.push(Command::Mask {
            pattern: pattern.clone(),
            mask: *mask,
            offset,
        });
        Ok(())
    }

    fn draw_image(&mut self, image: &Image, rect: Rect, alpha: f64) -> BackendResult<()> {
        self.check("draw_image")?;
        self.commands.push(Command::DrawImage {
            width: image.width(),
            height: image.height(),
            rect,
            transform: self.state.transform,
            alpha,
        });
        Ok(())
    }
}

