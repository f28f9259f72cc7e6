//! User-defined stage inputs/outputs, as seen by the program linker.

use naga::{Binding, Handle, Module, Type, TypeInner};

/// One location-bound input or output of an entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceSlot {
    pub location: u32,
    pub ty: TypeInner,
}

impl InterfaceSlot {
    /// Short GLSL-flavored type name used in link diagnostics.
    pub fn type_name(&self) -> String {
        describe(&self.ty)
    }
}

/// Location-bound inputs and outputs of a single entry point, sorted by location.
///
/// Built-ins (`gl_Position`, `gl_FragCoord`, ...) are not part of the interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageInterface {
    pub inputs: Vec<InterfaceSlot>,
    pub outputs: Vec<InterfaceSlot>,
}

impl StageInterface {
    pub(crate) fn from_entry_point(module: &Module, ep: &naga::EntryPoint) -> Self {
        let mut inputs = Vec::new();
        for arg in &ep.function.arguments {
            collect(module, arg.binding.as_ref(), arg.ty, &mut inputs);
        }

        let mut outputs = Vec::new();
        if let Some(result) = &ep.function.result {
            collect(module, result.binding.as_ref(), result.ty, &mut outputs);
        }

        inputs.sort_by_key(|s| s.location);
        outputs.sort_by_key(|s| s.location);

        Self { inputs, outputs }
    }

    pub fn input(&self, location: u32) -> Option<&InterfaceSlot> {
        self.inputs.iter().find(|s| s.location == location)
    }

    pub fn output(&self, location: u32) -> Option<&InterfaceSlot> {
        self.outputs.iter().find(|s| s.location == location)
    }
}

fn collect(
    module: &Module,
    binding: Option<&Binding>,
    ty: Handle<Type>,
    out: &mut Vec<InterfaceSlot>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => out.push(InterfaceSlot {
            location: *location,
            ty: module.types[ty].inner.clone(),
        }),
        Some(_) => {}
        // Unbound values are structs whose members carry the bindings.
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect(module, member.binding.as_ref(), member.ty, out);
                }
            }
        }
    }
}

fn describe(ty: &TypeInner) -> String {
    match ty {
        TypeInner::Scalar(scalar) => scalar_name(*scalar).to_owned(),
        TypeInner::Vector { size, scalar } => {
            let prefix = match scalar.kind {
                naga::ScalarKind::Float => "vec",
                naga::ScalarKind::Sint => "ivec",
                naga::ScalarKind::Uint => "uvec",
                naga::ScalarKind::Bool => "bvec",
                _ => "vec",
            };
            format!("{prefix}{}", *size as u8)
        }
        other => format!("{other:?}"),
    }
}

fn scalar_name(scalar: naga::Scalar) -> &'static str {
    match scalar.kind {
        naga::ScalarKind::Float if scalar.width == 8 => "double",
        naga::ScalarKind::Float => "float",
        naga::ScalarKind::Sint => "int",
        naga::ScalarKind::Uint => "uint",
        naga::ScalarKind::Bool => "bool",
        _ => "abstract",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(location: u32, ty: TypeInner) -> InterfaceSlot {
        InterfaceSlot { location, ty }
    }

    #[test]
    fn describes_vectors_and_scalars() {
        let v3 = TypeInner::Vector {
            size: naga::VectorSize::Tri,
            scalar: naga::Scalar::F32,
        };
        assert_eq!(slot(0, v3).type_name(), "vec3");
        assert_eq!(slot(1, TypeInner::Scalar(naga::Scalar::I32)).type_name(), "int");
    }

    #[test]
    fn lookup_by_location() {
        let iface = StageInterface {
            inputs: vec![slot(2, TypeInner::Scalar(naga::Scalar::F32))],
            outputs: vec![],
        };
        assert!(iface.input(2).is_some());
        assert!(iface.input(0).is_none());
        assert!(iface.output(2).is_none());
    }
}
