pub mod traits;
pub mod error;
pub mod layout;
pub mod node_cache;
pub mod change_detector;
pub mod widget_pool;
pub mod cull;
pub mod render;
pub mod engine;
pub mod scene_file;
pub mod virtual_scene;
pub mod writer;
pub mod theme;
pub mod name_pool;

// Export traits
pub use traits::{
    SceneReader, SceneSource, SceneMetadata, SceneNode, SceneGroup, NodeId,
    DynSceneSource, DynSceneMetadata, DynSceneNode,
};

// Export engine core
pub use engine::{HierarchyEngine, EngineConfig, HierarchyEvent, RowInteraction};
pub use layout::{LayoutNode, LayoutPass, LayoutSlot, LayoutTree};
pub use node_cache::{NodeCache, ResyncOptions};
pub use change_detector::ChangeDetector;
pub use widget_pool::{WidgetPool, WidgetSlot, PoolWidget, PoolStats};
pub use cull::{compute_cull_box, ViewRect};
pub use render::{Renderer, WidgetHost, LabelWidget, ToggleWidget};
pub use error::HierarchyError;

// Export scene file implementation
pub use scene_file::{
    SceneFileReader, SceneFileData, SceneFileMetadataRef, SceneFileNodeRef, parse_scene,
};

// Export virtual implementation
pub use virtual_scene::{VirtualSceneReader, VirtualSceneData, VirtualSceneNodeRef};

// Export writer
pub use writer::SceneWriter;

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, adjust_brightness, with_alpha};

// Export name interning utility
pub use name_pool::NamePool;
