/// Runs `create` inside a validation error scope.
///
/// wgpu reports invalid descriptors through the device's error sink, which
/// panics when nothing captures them. The scope turns such a rejection into
/// the returned message; the object `create` produced is discarded.
pub(crate) fn capture_validation<T>(
    device: &wgpu::Device,
    create: impl FnOnce() -> T,
) -> Result<T, String> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();

    match pollster::block_on(scope.pop()) {
        None => Ok(value),
        Some(err) => Err(format!("error: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::noop_device;

    #[test]
    fn accepted_object_is_returned() {
        let (device, _queue) = noop_device();
        let buffer = capture_validation(&device, || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("ok"),
                size: 16,
                usage: wgpu::BufferUsages::VERTEX,
                mapped_at_creation: false,
            })
        })
        .expect("valid buffer");
        assert_eq!(buffer.size(), 16);
    }

    #[test]
    fn rejected_object_becomes_a_message() {
        let (device, _queue) = noop_device();
        // Buffers mapped at creation must have a size aligned to 4 bytes.
        let err = capture_validation(&device, || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("bad"),
                size: 3,
                usage: wgpu::BufferUsages::VERTEX,
                mapped_at_creation: true,
            })
        })
        .expect_err("unaligned mapped buffer must be rejected");
        assert!(err.starts_with("error: "));
    }
}
