use crate::anchor::{NamedAnchor, Position};
use crate::config::{PlacementConfig, Viewport};
use crate::geometry::{Axis, BoundingBox, Point, clamp, dimensions_overlap, skip_boundary};
use crate::rotation::{default_origin, first_resolution_axis, rotate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementInput {
    pub target: BoundingBox,
    pub overlay: BoundingBox,
    /// Defaults to `top`.
    pub position: Option<Position>,
    /// Derived from where the anchor sits on the target when absent.
    pub origin: Option<Position>,
    pub config: PlacementConfig,
    pub viewport: Viewport,
}

impl PlacementInput {
    pub fn new(target: BoundingBox, overlay: BoundingBox, viewport: Viewport) -> Self {
        Self {
            target,
            overlay,
            viewport,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<Option<Position>>) -> Self {
        self.position = position.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<Option<Position>>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.config.allow_overlap = allow_overlap;
        self
    }
}

/// Offset of the pointer within the overlay, and its rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub top: f64,
    pub left: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoints {
    /// Measured from the target's top-left corner.
    pub relative: Point,
    pub absolute: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
    pub pointer: Option<Pointer>,
    pub pointer_opacity: Option<f64>,
    /// Only reported for top-style placements.
    pub anchor: Option<AnchorPoints>,
}

impl Placement {
    pub fn bounds(&self, overlay: &BoundingBox) -> BoundingBox {
        BoundingBox::new(self.left, self.top, overlay.width, overlay.height)
    }
}

/// Places the overlay's top-left corner for the given target, anchor and
/// origin, then derives the pointer. Total over its inputs: NaN degrades to
/// zero or passes through, nothing panics.
///
/// When the pointer flips to the far side of the target, only the pointer
/// changes; `top` and `left` always come from the clamp and overlap passes.
pub fn compute_position(input: &PlacementInput) -> Placement {
    let target = &input.target;
    let overlay = &input.overlay;
    let viewport = &input.viewport;

    let position = input.position.clone().unwrap_or(Position::Named(NamedAnchor::Top));

    let relative_anchor = position.resolve(target);
    let absolute_anchor = relative_anchor.offset(target.top_left());
    let rotated = rotate(relative_anchor, target);

    let origin_adjustment = match &input.origin {
        Some(origin) => origin.resolve(overlay),
        None => {
            let origin = default_origin(rotated);
            log::debug!("no origin given, using {}", origin.as_str());
            Position::Named(origin).resolve(overlay)
        }
    };

    // Where the overlay would sit with an unbounded viewport.
    let computed = absolute_anchor.minus(origin_adjustment);
    let clamped = Point::new(
        clamp(0.0, computed.left, viewport.width - overlay.width),
        clamp(0.0, computed.top, viewport.height - overlay.height),
    );

    let placed = if input.config.allow_overlap {
        clamped
    } else {
        avoid_target(clamped, target, overlay, first_resolution_axis(rotated))
    };

    let (pointer, pointer_opacity) = pointer_geometry(position.named(), target, overlay, viewport);
    let anchor = is_top_style(position.named()).then_some(AnchorPoints {
        relative: relative_anchor,
        absolute: absolute_anchor,
    });

    Placement {
        top: placed.top,
        left: placed.left,
        pointer,
        pointer_opacity,
        anchor,
    }
}

/// Settles one axis, then the other, pushing the overlay past the far edge of
/// the target whenever the two would otherwise overlap.
fn avoid_target(clamped: Point, target: &BoundingBox, overlay: &BoundingBox, first: Axis) -> Point {
    let second = first.other();
    log::debug!("resolving {first:?} before {second:?}");

    let first_value = settle_axis(first, first.of(clamped), second.of(clamped), target, overlay);
    let second_value = settle_axis(second, second.of(clamped), first_value, target, overlay);

    match first {
        Axis::X => Point::new(first_value, second_value),
        Axis::Y => Point::new(second_value, first_value),
    }
}

/// `candidate` is the overlay's start on `axis`; `cross_start` its start on
/// the other axis.
fn settle_axis(
    axis: Axis,
    candidate: f64,
    cross_start: f64,
    target: &BoundingBox,
    overlay: &BoundingBox,
) -> f64 {
    let cross = axis.other();
    let overlapping = dimensions_overlap(
        target.start_along(cross),
        target.end_along(cross),
        cross_start,
        cross_start + overlay.size_along(cross),
    );
    if !overlapping {
        return candidate;
    }
    let target_start = target.start_along(axis);
    skip_boundary(
        candidate,
        target_start - overlay.size_along(axis),
        target_start + target.size_along(axis),
        true,
    )
}

fn is_top_style(anchor: Option<NamedAnchor>) -> bool {
    !matches!(
        anchor,
        Some(NamedAnchor::Bottom | NamedAnchor::Right | NamedAnchor::Left | NamedAnchor::Center)
    )
}

fn pointer_geometry(
    anchor: Option<NamedAnchor>,
    target: &BoundingBox,
    overlay: &BoundingBox,
    viewport: &Viewport,
) -> (Option<Pointer>, Option<f64>) {
    let pointer = match anchor {
        Some(NamedAnchor::Bottom) => {
            let overlay_end = target.top + target.height + overlay.height;
            if overlay_end > viewport.scroll_y + viewport.height {
                log::debug!("no room below target, pointer flipped");
                Pointer {
                    top: overlay.height,
                    left: overlay.width / 2.0,
                    rotation: 0.0,
                }
            } else {
                Pointer {
                    top: 0.0,
                    left: overlay.width / 2.0,
                    rotation: 180.0,
                }
            }
        }
        Some(NamedAnchor::Right) => {
            let overlay_end = target.left + target.width + overlay.width;
            if overlay_end > viewport.width {
                log::debug!("no room right of target, pointer flipped");
                Pointer {
                    top: overlay.height / 2.0,
                    left: overlay.width,
                    rotation: -90.0,
                }
            } else {
                Pointer {
                    top: overlay.height / 2.0,
                    left: 0.0,
                    rotation: 90.0,
                }
            }
        }
        Some(NamedAnchor::Left) => {
            if target.left - overlay.width < 0.0 {
                log::debug!("no room left of target, pointer flipped");
                Pointer {
                    top: overlay.height / 2.0,
                    left: 0.0,
                    rotation: 90.0,
                }
            } else {
                Pointer {
                    top: overlay.height / 2.0,
                    left: overlay.width,
                    rotation: -90.0,
                }
            }
        }
        Some(NamedAnchor::Center) => return (None, Some(0.0)),
        _ => {
            if target.top - overlay.height < viewport.scroll_y {
                log::debug!("no room above target, pointer flipped");
                Pointer {
                    top: 0.0,
                    left: overlay.width / 2.0,
                    rotation: 180.0,
                }
            } else {
                Pointer {
                    top: overlay.height,
                    left: overlay.width / 2.0,
                    rotation: 0.0,
                }
            }
        }
    };
    (Some(pointer), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(anchor: NamedAnchor) -> Position {
        Position::Named(anchor)
    }

    fn pointer(top: f64, left: f64, rotation: f64) -> Option<Pointer> {
        Some(Pointer {
            top,
            left,
            rotation,
        })
    }

    fn floating_target() -> BoundingBox {
        BoundingBox::new(300.0, 300.0, 50.0, 20.0)
    }

    fn input(target: BoundingBox, anchor: NamedAnchor) -> PlacementInput {
        PlacementInput::new(target, BoundingBox::sized(100.0, 40.0), Viewport::new(1000.0, 800.0))
            .with_position(named(anchor))
    }

    #[test]
    fn bottom_below_target_without_flip() {
        let target = BoundingBox::new(10.0, 10.0, 50.0, 20.0);
        let placement = compute_position(&input(target, NamedAnchor::Bottom));
        assert_eq!(placement.top, 30.0);
        assert_eq!(placement.left, 0.0);
        assert_eq!(placement.pointer, pointer(0.0, 50.0, 180.0));
        assert_eq!(placement.pointer_opacity, None);
        assert_eq!(placement.anchor, None);
    }

    #[test]
    fn bottom_flips_pointer_near_viewport_end() {
        let target = BoundingBox::new(300.0, 760.0, 50.0, 20.0);
        let placement = compute_position(&input(target, NamedAnchor::Bottom));
        assert_eq!(placement.pointer, pointer(40.0, 50.0, 0.0));
        // Flipping leaves the resolved coordinates alone.
        assert_eq!((placement.top, placement.left), (780.0, 275.0));
    }

    #[test]
    fn bottom_flip_accounts_for_scroll() {
        let target = BoundingBox::new(300.0, 760.0, 50.0, 20.0);
        let mut request = input(target, NamedAnchor::Bottom);
        request.viewport = request.viewport.scrolled(100.0);
        let placement = compute_position(&request);
        assert_eq!(placement.pointer, pointer(0.0, 50.0, 180.0));
    }

    #[test]
    fn top_sits_above_with_room() {
        let placement = compute_position(&input(floating_target(), NamedAnchor::Top));
        assert_eq!((placement.top, placement.left), (260.0, 275.0));
        assert_eq!(placement.pointer, pointer(40.0, 50.0, 0.0));
        assert_eq!(
            placement.anchor,
            Some(AnchorPoints {
                relative: Point::new(25.0, 0.0),
                absolute: Point::new(325.0, 300.0),
            })
        );
    }

    #[test]
    fn top_without_room_is_pushed_below() {
        let target = BoundingBox::new(10.0, 10.0, 50.0, 20.0);
        let placement = compute_position(&input(target, NamedAnchor::Top));
        assert_eq!((placement.top, placement.left), (30.0, 0.0));
        assert_eq!(placement.pointer, pointer(0.0, 50.0, 180.0));
    }

    #[test]
    fn missing_position_means_top() {
        let mut request = input(floating_target(), NamedAnchor::Top);
        request.position = None;
        let placement = compute_position(&request);
        assert_eq!((placement.top, placement.left), (260.0, 275.0));
        assert_eq!(placement.pointer, pointer(40.0, 50.0, 0.0));
    }

    #[test]
    fn right_beside_target() {
        let placement = compute_position(&input(floating_target(), NamedAnchor::Right));
        assert_eq!((placement.top, placement.left), (290.0, 350.0));
        assert_eq!(placement.pointer, pointer(20.0, 0.0, 90.0));
    }

    #[test]
    fn right_flips_pointer_in_narrow_viewport() {
        let mut request = input(floating_target(), NamedAnchor::Right);
        request.viewport = Viewport::new(400.0, 800.0);
        let placement = compute_position(&request);
        assert_eq!(placement.pointer, pointer(20.0, 100.0, -90.0));
        assert_eq!((placement.top, placement.left), (290.0, 350.0));
    }

    #[test]
    fn left_beside_target() {
        let placement = compute_position(&input(floating_target(), NamedAnchor::Left));
        assert_eq!((placement.top, placement.left), (290.0, 200.0));
        assert_eq!(placement.pointer, pointer(20.0, 100.0, -90.0));
    }

    #[test]
    fn left_flips_pointer_near_viewport_start() {
        let target = BoundingBox::new(50.0, 300.0, 50.0, 20.0);
        let placement = compute_position(&input(target, NamedAnchor::Left));
        assert_eq!(placement.pointer, pointer(20.0, 0.0, 90.0));
        assert_eq!((placement.top, placement.left), (290.0, 100.0));
    }

    #[test]
    fn center_hides_pointer() {
        let request = input(floating_target(), NamedAnchor::Center).allow_overlap(true);
        let placement = compute_position(&request);
        assert_eq!((placement.top, placement.left), (290.0, 275.0));
        assert_eq!(placement.pointer, None);
        assert_eq!(placement.pointer_opacity, Some(0.0));
    }

    #[test]
    fn center_without_overlap_moves_below() {
        let placement = compute_position(&input(floating_target(), NamedAnchor::Center));
        assert_eq!((placement.top, placement.left), (320.0, 275.0));
        assert!(!placement.bounds(&BoundingBox::sized(100.0, 40.0)).intersects(&floating_target()));
    }

    #[test]
    fn explicit_origin_overrides_default() {
        let request = input(floating_target(), NamedAnchor::Bottom)
            .with_origin(named(NamedAnchor::TopLeft))
            .allow_overlap(true);
        let placement = compute_position(&request);
        assert_eq!((placement.top, placement.left), (320.0, 325.0));
    }

    #[test]
    fn explicit_coordinates_use_top_pointer() {
        let request = input(floating_target(), NamedAnchor::Top)
            .with_position(Position::coordinates("20px", "50%"))
            .allow_overlap(true);
        let placement = compute_position(&request);
        // Anchor left of centre on the middle row: overlay's right edge faces it.
        assert_eq!((placement.top, placement.left), (290.0, 220.0));
        assert_eq!(placement.pointer, pointer(40.0, 50.0, 0.0));
        assert_eq!(placement.anchor.map(|a| a.relative), Some(Point::new(20.0, 10.0)));
    }

    #[test]
    fn unknown_name_anchors_top_left() {
        let request = input(floating_target(), NamedAnchor::Top)
            .with_position(Position::parse("sideways"))
            .allow_overlap(true);
        let placement = compute_position(&request);
        assert_eq!((placement.top, placement.left), (300.0, 200.0));
        assert_eq!(placement.pointer, pointer(40.0, 50.0, 0.0));
    }

    #[test]
    fn oversized_overlay_clamps_to_negative_bound() {
        let request = PlacementInput::new(
            floating_target(),
            BoundingBox::sized(1200.0, 40.0),
            Viewport::new(1000.0, 800.0),
        )
        .allow_overlap(true);
        let placement = compute_position(&request);
        assert_eq!(placement.left, -200.0);
    }

    #[test]
    fn nan_box_does_not_panic() {
        let target = BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0);
        let placement = compute_position(&input(target, NamedAnchor::Top));
        assert!(placement.left.is_nan());
        assert!(placement.pointer.is_some());
    }

    proptest! {
        #[test]
        fn overlapping_placements_stay_in_viewport(
            target_left in -500.0f64..1500.0,
            target_top in -500.0f64..1500.0,
            target_w in 0.0f64..400.0,
            target_h in 0.0f64..400.0,
            overlay_w in 0.0f64..1500.0,
            overlay_h in 0.0f64..1000.0,
            anchor in 0usize..9,
        ) {
            let viewport = Viewport::new(1000.0, 800.0);
            let request = PlacementInput::new(
                BoundingBox::new(target_left, target_top, target_w, target_h),
                BoundingBox::sized(overlay_w, overlay_h),
                viewport,
            )
            .with_position(named(NamedAnchor::ALL[anchor]))
            .allow_overlap(true);
            let placement = compute_position(&request);

            let max_left = viewport.width - overlay_w;
            let max_top = viewport.height - overlay_h;
            if max_left >= 0.0 {
                prop_assert!(placement.left >= 0.0 && placement.left <= max_left);
            } else {
                prop_assert_eq!(placement.left, max_left);
            }
            if max_top >= 0.0 {
                prop_assert!(placement.top >= 0.0 && placement.top <= max_top);
            } else {
                prop_assert_eq!(placement.top, max_top);
            }
        }

        #[test]
        fn roomy_placements_avoid_the_target(
            target_left in 200i32..600,
            target_top in 200i32..400,
            target_w in 1i32..200,
            target_h in 1i32..200,
            overlay_w in 1i32..200,
            overlay_h in 1i32..200,
            anchor in 0usize..9,
        ) {
            let target = BoundingBox::new(
                f64::from(target_left),
                f64::from(target_top),
                f64::from(target_w),
                f64::from(target_h),
            );
            let overlay = BoundingBox::sized(f64::from(overlay_w), f64::from(overlay_h));
            let request = PlacementInput::new(target, overlay, Viewport::new(1000.0, 800.0))
                .with_position(named(NamedAnchor::ALL[anchor]));
            let placement = compute_position(&request);
            prop_assert!(!placement.bounds(&overlay).intersects(&target));
        }
    }
}
