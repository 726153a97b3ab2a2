use tracing::debug;

use crate::geometry::Rectangle;

/// Dead-zone margin on the left and right edges of the player.
const SIDE_INSET: i32 = 20;
/// Top inset keeping the title chrome out of the swipe area.
const TOP_INSET: i32 = 40;
/// Bottom inset keeping the seek bar and control row out of the swipe area.
const BOTTOM_INSET: i32 = 120;

/// Derives the volume and brightness interaction zones from the current
/// player bounds.
///
/// Layout of the effective swipe area, brightness on the left and volume on
/// the right, with everything else dead:
///
/// ```text
///  0    brightness.right          volume.x      width
///  |          |                       |            |
///  | <-20-> | brightness |  dead  |   volume   | <-20-> |
/// ```
///
/// The player bounds snapshot is updated only on layout notifications; the
/// zone rectangles are cheap math over that snapshot and are recomputed on
/// every read.
pub struct SwipeZonesController {
    fallback_screen_rect: Rectangle,
    player_rect: Option<Rectangle>,
    zone_width_percent: i32,
}

impl SwipeZonesController {
    /// `zone_width_percent` must already be validated into `[0, 50]` by the
    /// configuration boundary.
    pub fn new(fallback_screen_rect: Rectangle, zone_width_percent: i32) -> Self {
        Self {
            fallback_screen_rect,
            player_rect: None,
            zone_width_percent,
        }
    }

    /// Update the player bounds snapshot from a layout-change notification.
    ///
    /// The player surface is centered inside its container; using the surface
    /// width plus twice its x offset excludes any side panel from the
    /// measured width while keeping the rectangle centered.
    pub fn on_player_layout(&mut self, container: Rectangle, surface: Rectangle) {
        let surface_width_with_padding = surface.width + surface.x * 2;
        let rect = Rectangle::new(
            container.x,
            container.y,
            container.width.min(surface_width_with_padding),
            container.height,
        );
        debug!(?rect, "player bounds updated");
        self.player_rect = Some(rect);
    }

    /// The rectangle of the volume control zone (rightmost slice).
    pub fn volume(&self) -> Rectangle {
        let effective = self.effective_swipe_rect();
        let zone_width = self.zone_width(&effective);
        Rectangle::new(
            effective.right() - zone_width,
            effective.top(),
            zone_width,
            effective.height,
        )
    }

    /// The rectangle of the screen brightness control zone (leftmost slice).
    pub fn brightness(&self) -> Rectangle {
        let effective = self.effective_swipe_rect();
        let zone_width = self.zone_width(&effective);
        Rectangle::new(
            effective.left(),
            effective.top(),
            zone_width,
            effective.height,
        )
    }

    /// The area of the player that is effectively usable for swipe controls.
    /// Empty if the player bounds are smaller than the dead-zone insets.
    fn effective_swipe_rect(&self) -> Rectangle {
        let bounds = self.player_rect.unwrap_or(self.fallback_screen_rect);
        Rectangle::new(
            bounds.x + SIDE_INSET,
            bounds.y + TOP_INSET,
            bounds.width - 2 * SIDE_INSET,
            bounds.height - TOP_INSET - BOTTOM_INSET,
        )
    }

    fn zone_width(&self, effective: &Rectangle) -> i32 {
        effective.width * self.zone_width_percent / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn player_1000x2000() -> SwipeZonesController {
        let mut zones = SwipeZonesController::new(Rectangle::new(0, 0, 500, 500), 37);
        zones.on_player_layout(
            Rectangle::new(0, 0, 1000, 2000),
            Rectangle::new(0, 0, 1000, 2000),
        );
        zones
    }

    #[test]
    fn zones_match_reference_layout() {
        let zones = player_1000x2000();

        let volume = zones.volume();
        assert_eq!(volume, Rectangle::new(625, 40, 355, 1840));

        let brightness = zones.brightness();
        assert_eq!(brightness, Rectangle::new(20, 40, 355, 1840));
    }

    #[test]
    fn zones_are_disjoint_with_volume_on_the_right() {
        for percent in [0, 10, 25, 37, 50] {
            let mut zones = SwipeZonesController::new(Rectangle::new(0, 0, 500, 500), percent);
            zones.on_player_layout(
                Rectangle::new(0, 0, 1080, 1920),
                Rectangle::new(0, 0, 1080, 1920),
            );
            let volume = zones.volume();
            let brightness = zones.brightness();
            assert!(brightness.right() <= volume.left(), "percent {percent}");
            assert!(brightness.left() >= 20);
            assert!(volume.right() <= 1080 - 20);
        }
    }

    #[test]
    fn fallback_rect_used_until_first_layout() {
        let zones = SwipeZonesController::new(Rectangle::new(0, 0, 1000, 2000), 37);
        assert_eq!(zones.volume(), Rectangle::new(625, 40, 355, 1840));
    }

    #[test]
    fn centered_surface_excludes_side_panel() {
        let mut zones = SwipeZonesController::new(Rectangle::new(0, 0, 500, 500), 50);
        // surface 1200 wide at x=100 inside a 2000-wide container: the
        // rightmost 600 units are a side panel
        zones.on_player_layout(
            Rectangle::new(0, 0, 2000, 1000),
            Rectangle::new(100, 0, 1200, 1000),
        );
        let volume = zones.volume();
        assert_eq!(volume.right(), 1400 - 20);
    }

    #[test]
    fn surface_wider_than_container_is_capped() {
        let mut zones = SwipeZonesController::new(Rectangle::new(0, 0, 500, 500), 50);
        zones.on_player_layout(
            Rectangle::new(0, 0, 800, 600),
            Rectangle::new(50, 0, 900, 600),
        );
        assert_eq!(zones.volume().right(), 800 - 20);
    }

    #[test]
    fn undersized_player_fails_safe_to_empty_zones() {
        let mut zones = SwipeZonesController::new(Rectangle::new(0, 0, 500, 500), 50);
        zones.on_player_layout(Rectangle::new(0, 0, 30, 100), Rectangle::new(0, 0, 30, 100));
        let volume = zones.volume();
        let brightness = zones.brightness();
        assert!(volume.is_empty());
        assert!(brightness.is_empty());
        assert!(!volume.contains(Point::new(15, 50)));
    }
}
