use winit::dpi::PhysicalSize;

use crate::coords::Viewport;
use crate::device::ViewportTarget;

/// Framebuffer-resize handler: one viewport update covering the new size.
///
/// The runtime calls it once right after the context is created and then on
/// every resize.
pub fn framebuffer_size_callback<T>(target: &mut T, size: PhysicalSize<u32>)
where
    T: ViewportTarget + ?Sized,
{
    target.set_viewport(size, Viewport::full(size.width, size.height));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(PhysicalSize<u32>, Viewport)>,
    }

    impl ViewportTarget for Recorder {
        fn set_viewport(&mut self, framebuffer: PhysicalSize<u32>, viewport: Viewport) {
            self.calls.push((framebuffer, viewport));
        }
    }

    #[test]
    fn one_update_per_resize() {
        let mut r = Recorder::default();
        framebuffer_size_callback(&mut r, PhysicalSize::new(1024, 768));
        assert_eq!(
            r.calls,
            vec![(PhysicalSize::new(1024, 768), Viewport::new(0, 0, 1024, 768))]
        );
    }

    #[test]
    fn initial_then_resized() {
        let mut r = Recorder::default();
        framebuffer_size_callback(&mut r, PhysicalSize::new(800, 600));
        framebuffer_size_callback(&mut r, PhysicalSize::new(640, 480));

        let viewports: Vec<Viewport> = r.calls.iter().map(|(_, v)| *v).collect();
        assert_eq!(viewports, vec![Viewport::full(800, 600), Viewport::full(640, 480)]);
    }

    #[test]
    fn framebuffer_matches_reported_size() {
        let mut r = Recorder::default();
        framebuffer_size_callback(&mut r, PhysicalSize::new(0, 0));
        framebuffer_size_callback(&mut r, PhysicalSize::new(1280, 720));

        let sizes: Vec<PhysicalSize<u32>> = r.calls.iter().map(|(s, _)| *s).collect();
        assert_eq!(sizes, vec![PhysicalSize::new(0, 0), PhysicalSize::new(1280, 720)]);
        assert!(r.calls[0].1.is_empty());
    }
}
