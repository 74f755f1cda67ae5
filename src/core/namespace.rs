//! Namespace resolution for factory instances.

use crate::core::classify::InstanceShape;
use crate::core::eval::{Unsupported, eval_static_string};

/// Compute the namespace of an instance; `Ok(None)` is the global bucket.
///
/// - `minErr('ng')(...)`: the statically evaluated first argument of the inner
///   factory call, or global when the factory was called without arguments.
/// - `ngMinErr(...)`: the identifier prefix, no evaluation involved.
pub fn resolve_namespace(shape: InstanceShape<'_>) -> Result<Option<String>, Unsupported> {
    match shape {
        InstanceShape::Direct(factory_call) => match factory_call.args.first() {
            Some(arg) => {
                if let Some(spread) = arg.spread {
                    return Err(Unsupported::new("Spread", spread));
                }
                eval_static_string(&arg.expr).map(Some)
            }
            None => Ok(None),
        },
        InstanceShape::Namespaced(prefix) => Ok(Some(prefix.to_string())),
    }
}
