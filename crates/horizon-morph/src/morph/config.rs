//! Morph node configuration and builder.

use std::sync::Arc;

use horizon_morph_core::ProgressSource;
use horizon_morph_render::ClipBehavior;
use serde::{Deserialize, Serialize};

use super::node::MorphNode;
use crate::error::{MorphError, MorphResult};
use crate::layout::{AlignmentGeometry, StackChild, StackFit, TextDirection};
use crate::render_box::{ChildSlot, RenderBox};

/// Static configuration of a [`MorphNode`].
///
/// Deserializes from partial documents; missing fields take their defaults.
///
/// ```
/// use horizon_morph::{Alignment, ClipBehavior, MorphConfig};
///
/// let config = MorphConfig::new()
///     .with_alignment(Alignment::CENTER)
///     .with_clip_behavior(ClipBehavior::AntiAlias)
///     .with_resize_children_when_animating(true);
/// assert!(config.resize_children_when_animating);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Where children smaller or larger than the node are placed.
    pub alignment: AlignmentGeometry,
    /// Resolves directional alignments.
    pub text_direction: TextDirection,
    /// Constraints children are measured under.
    pub fit: StackFit,
    /// Clip applied while morphing between differently sized children.
    pub clip_behavior: ClipBehavior,
    /// Force both children to the interpolated size while animating.
    pub resize_children_when_animating: bool,
}

impl MorphConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alignment(mut self, alignment: impl Into<AlignmentGeometry>) -> Self {
        self.alignment = alignment.into();
        self
    }

    pub fn with_text_direction(mut self, text_direction: TextDirection) -> Self {
        self.text_direction = text_direction;
        self
    }

    pub fn with_fit(mut self, fit: StackFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_clip_behavior(mut self, clip_behavior: ClipBehavior) -> Self {
        self.clip_behavior = clip_behavior;
        self
    }

    pub fn with_resize_children_when_animating(mut self, resize: bool) -> Self {
        self.resize_children_when_animating = resize;
        self
    }
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            alignment: AlignmentGeometry::default(),
            text_direction: TextDirection::Ltr,
            fit: StackFit::Loose,
            clip_behavior: ClipBehavior::HardEdge,
            resize_children_when_animating: false,
        }
    }
}

/// Builder for a [`MorphNode`].
///
/// Both children and a progress source are required; [`build`](Self::build)
/// reports whichever is missing.
#[derive(Default)]
pub struct MorphNodeBuilder {
    config: MorphConfig,
    progress: Option<Arc<dyn ProgressSource>>,
    first: Option<Box<dyn RenderBox>>,
    second: Option<Box<dyn RenderBox>>,
}

impl MorphNodeBuilder {
    /// Start with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: MorphConfig) -> Self {
        self.config = config;
        self
    }

    /// The progress source driving the morph.
    pub fn progress(mut self, progress: Arc<dyn ProgressSource>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The child shown at progress 0.
    pub fn first_child(mut self, child: Box<dyn RenderBox>) -> Self {
        self.first = Some(child);
        self
    }

    /// The child shown at progress 1.
    pub fn second_child(mut self, child: Box<dyn RenderBox>) -> Self {
        self.second = Some(child);
        self
    }

    /// Build the node, detached.
    pub fn build(self) -> MorphResult<MorphNode> {
        let progress = self.progress.ok_or(MorphError::MissingProgressSource)?;
        let first = self.first.ok_or(MorphError::MissingChild(ChildSlot::First))?;
        let second = self
            .second
            .ok_or(MorphError::MissingChild(ChildSlot::Second))?;
        Ok(MorphNode::from_parts(
            self.config,
            progress,
            [StackChild::new(first), StackChild::new(second)],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Alignment, AlignmentDirectional};
    use horizon_morph_core::ConstantProgress;

    #[test]
    fn test_defaults() {
        let config = MorphConfig::default();
        assert_eq!(
            config.alignment,
            AlignmentGeometry::Directional(AlignmentDirectional::TOP_START)
        );
        assert_eq!(config.text_direction, TextDirection::Ltr);
        assert_eq!(config.fit, StackFit::Loose);
        assert_eq!(config.clip_behavior, ClipBehavior::HardEdge);
        assert!(!config.resize_children_when_animating);
    }

    #[test]
    fn test_with_builders() {
        let config = MorphConfig::new()
            .with_alignment(Alignment::CENTER)
            .with_text_direction(TextDirection::Rtl)
            .with_fit(StackFit::Expand)
            .with_clip_behavior(ClipBehavior::None);
        assert_eq!(config.alignment, AlignmentGeometry::Absolute(Alignment::CENTER));
        assert_eq!(config.text_direction, TextDirection::Rtl);
        assert_eq!(config.fit, StackFit::Expand);
        assert_eq!(config.clip_behavior, ClipBehavior::None);
    }

    #[test]
    fn test_build_requires_progress() {
        let result = MorphNodeBuilder::new().build();
        assert!(matches!(result, Err(MorphError::MissingProgressSource)));
    }

    #[test]
    fn test_build_requires_children() {
        let progress: Arc<dyn ProgressSource> = Arc::new(ConstantProgress::dismissed());
        let result = MorphNodeBuilder::new().progress(progress).build();
        assert!(matches!(
            result,
            Err(MorphError::MissingChild(ChildSlot::First))
        ));
    }
}
