//! Painting core for the skypaint viewer.
//!
//! The pipeline runs once per frame:
//! pointer position → NDC → world ray → nearest mesh hit → UV → bitmap pixel
//! → line segment from the previous pixel → brush footprints in the bitmap.
//!
//! Nothing here touches the GPU. The renderer only reads [`Bitmap::as_rgba`]
//! when [`Bitmap::take_dirty`] reports a change.

pub mod bitmap;
pub mod camera;
pub mod color;
pub mod io;
pub mod mesh;
pub mod pointer;
pub mod projector;
pub mod raster;
pub mod ray;
pub mod session;
pub mod settings;
pub mod stroke;
pub mod uv;

pub use bitmap::Bitmap;
pub use camera::{PerspectiveCamera, RayCaster};
pub use color::{BrushColor, ParseColorError};
pub use io::ImageIoError;
pub use mesh::{PaintMesh, Side};
pub use pointer::PointerState;
pub use projector::ViewportRect;
pub use ray::{Ray, RayHit, RaySurface};
pub use session::{DriverState, FrameOutcome, PaintingSession};
pub use settings::PaintSettings;
pub use stroke::{PixelPos, StrokeCursor};

pub use glam;
