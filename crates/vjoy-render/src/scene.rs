//! `Surface` implementation over a Vello scene.

use kurbo::{Affine, Circle, Line, Stroke};
use peniko::{Color, Fill};
use vello::Scene;
use vjoy_core::{Joystick, Point, Surface, parse_css_color};

/// Paints joystick ops into a Vello scene.
///
/// `clear` resets the whole scene, so hosts that composite other content
/// should paint into a dedicated scene and `append` it (see
/// [`paint_joystick`]).
pub struct VelloSurface<'a> {
    scene: &'a mut Scene,
    transform: Affine,
    alpha: f32,
    saved: Vec<f32>,
}

impl<'a> VelloSurface<'a> {
    pub fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            transform: Affine::IDENTITY,
            alpha: 1.0,
            saved: Vec::new(),
        }
    }

    /// Map local surface coordinates through `transform`.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    fn color(&self, css: &str) -> Option<Color> {
        match parse_css_color(css) {
            Ok(c) => {
                let [r, g, b, a] = c.to_rgba8();
                let a = (a as f32 * self.alpha.clamp(0.0, 1.0)).round() as u8;
                Some(Color::from_rgba8(r, g, b, a))
            }
            Err(e) => {
                log::warn!("skipping paint: {e}");
                None
            }
        }
    }
}

fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x as f64, p.y as f64)
}

impl Surface for VelloSurface<'_> {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.scene.reset();
    }

    fn save(&mut self) {
        self.saved.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.saved.pop() {
            self.alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: &str, width: f32) {
        let Some(color) = self.color(color) else {
            return;
        };
        let line = Line::new(to_kurbo(from), to_kurbo(to));
        self.scene
            .stroke(&Stroke::new(width as f64), self.transform, color, None, &line);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: &str) {
        let Some(color) = self.color(color) else {
            return;
        };
        let circle = Circle::new(to_kurbo(center), radius as f64);
        self.scene
            .fill(Fill::NonZero, self.transform, color, None, &circle);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, color: &str, width: f32) {
        let Some(color) = self.color(color) else {
            return;
        };
        let circle = Circle::new(to_kurbo(center), radius as f64);
        self.scene
            .stroke(&Stroke::new(width as f64), self.transform, color, None, &circle);
    }
}

/// Advance the joystick one frame and paint it into a fresh scene.
///
/// Returns `None` when the widget is hidden. The scene is in local surface
/// coordinates; append it with a translation to the surface origin.
pub fn paint_joystick(joystick: &mut Joystick) -> Option<Scene> {
    let mut scene = Scene::new();
    let visible = joystick.frame(&mut VelloSurface::new(&mut scene));
    visible.then_some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vjoy_core::JoystickStyle;

    #[test]
    fn hidden_joystick_produces_no_scene() {
        let mut joy = Joystick::default();
        assert!(paint_joystick(&mut joy).is_none());
    }

    #[test]
    fn visible_joystick_paints() {
        let mut joy = Joystick::new(JoystickStyle {
            dynamic: false,
            ..Default::default()
        });
        let scene = paint_joystick(&mut joy).expect("fixed joystick is visible");
        assert!(!scene.encoding().is_empty());
    }

    #[test]
    fn restore_pops_alpha() {
        let mut scene = Scene::new();
        let mut surface = VelloSurface::new(&mut scene);
        surface.save();
        surface.set_global_alpha(0.25);
        surface.restore();
        assert_eq!(surface.alpha, 1.0);
    }

    #[test]
    fn bad_colours_are_skipped() {
        let mut scene = Scene::new();
        let mut surface = VelloSurface::new(&mut scene);
        surface.fill_circle(Point::ZERO, 10.0, "not-a-colour");
        assert!(scene.encoding().is_empty());
    }

    #[test]
    fn transform_maps_local_coordinates() {
        let mut scene = Scene::new();
        let offset = Affine::translate((40.0, 25.0));
        let mut surface = VelloSurface::new(&mut scene).with_transform(offset);
        surface.stroke_circle(Point::new(60.0, 60.0), 50.0, "#222", 4.0);
        assert_eq!(surface.transform, offset);
        assert!(!scene.encoding().is_empty());
    }
}
