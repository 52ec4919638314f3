pub mod adapter;
pub mod camera;
pub mod geometry;
pub mod pick;
pub mod proxy;

pub use adapter::{AnimationSettings, ObjectRenderAdapter, PointerEvent};
pub use camera::OrbitCamera;
pub use geometry::{GeometryDescriptor, MaterialDescriptor};
pub use pick::{PickHit, Ray};
pub use proxy::{ProxyHandle, ProxyNode, ProxyRegistry, ProxyState, Transform, MAIN_OBJECT_NAME};
