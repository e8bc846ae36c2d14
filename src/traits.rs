/// Type alias for scene object IDs (stable identifiers assigned by the host scene)
pub type NodeId = u64;

/// One top-level grouping of the external hierarchy (e.g. a loaded scene or
/// world). Groups are rendered as synthetic header rows that carry no backing
/// scene object of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneGroup {
    /// Display label for the group header row
    pub label: String,
    /// IDs of the group's top-level objects, in display order
    pub root_ids: Vec<NodeId>,
}

// Forward declarations for enum types (defined at end of file)
pub enum DynSceneSource {
    File(crate::scene_file::SceneFileData),
    Virtual(crate::virtual_scene::VirtualSceneData),
}

pub enum DynSceneMetadata<'a> {
    File(crate::scene_file::SceneFileMetadataRef<'a>),
    Virtual(crate::virtual_scene::VirtualSceneMetadataRef<'a>),
}

#[derive(Clone)]
pub enum DynSceneNode<'a> {
    File(crate::scene_file::SceneFileNodeRef<'a>),
    Virtual(crate::virtual_scene::VirtualSceneNodeRef<'a>),
}

/// Trait for loading scene snapshots and returning SceneSource data
pub trait SceneReader {
    /// Opens and parses a scene snapshot, returning a DynSceneSource enum
    fn read(&self, file_path: &str) -> anyhow::Result<DynSceneSource>;
}

/// Trait for accessing the external object hierarchy.
///
/// The engine never walks a source behind the caller's back: resync and the
/// change detector are the only consumers, and both go through this interface.
/// SceneSource must be Send to support loading snapshots on background threads.
pub trait SceneSource: Send {
    type Metadata<'a>: SceneMetadata where Self: 'a;
    type Node<'a>: SceneNode<'a> where Self: 'a;

    /// Returns metadata describing the snapshot (header and totals)
    fn metadata(&self) -> Self::Metadata<'_>;

    /// Enumerates the top-level groups with their root object IDs.
    ///
    /// Order is stable across calls unless the source genuinely changed.
    fn groups(&self) -> Vec<SceneGroup>;

    /// Gets an object by ID; None when the object no longer exists
    fn get_node(&self, id: NodeId) -> Option<Self::Node<'_>>;
}

/// Trait for accessing snapshot metadata
pub trait SceneMetadata {
    /// Returns the format/source version
    fn version(&self) -> String;

    /// Returns the header payload (free-form, source specific)
    fn header_data(&self) -> &serde_json::Value;

    /// Returns the total number of groups, when known up front
    fn total_groups(&self) -> Option<usize>;

    /// Returns the total number of objects, when known up front
    fn total_nodes(&self) -> Option<usize>;
}

/// Trait for accessing one object of the external hierarchy.
///
/// The lifetime parameter 'data is the lifetime of the underlying SceneSource
/// storage. Children share the parent's lifetime, so a resync walk can hold
/// handles across recursion without re-fetching by ID.
pub trait SceneNode<'data>: Clone {
    /// Returns the object's stable ID
    fn id(&self) -> NodeId;

    /// Returns the display label shown on the object's row
    fn display_name(&self) -> String;

    /// Returns whether the object is active in the host scene.
    ///
    /// Inactive objects stay in the hierarchy; the renderer only dims them.
    fn is_active(&self) -> bool;

    /// Returns whether the object is marked to be hidden from the outliner.
    ///
    /// Marked objects are excluded from the resync walk entirely, together
    /// with their subtrees.
    fn has_ignore_marker(&self) -> bool;

    /// Returns the number of children
    fn num_children(&self) -> usize;

    /// Returns the child at the given index.
    ///
    /// The returned child has the same lifetime as the parent (both tied to
    /// the SceneSource storage).
    fn child_at(&self, index: usize) -> Option<Self>;

    /// Returns the preferred row width of the object's label, in layout units
    fn preferred_width(&self) -> f32;

    /// Returns the preferred row height of the object, in layout units
    fn preferred_height(&self) -> f32;
}

// ============================================================================
// Enum Dispatch Implementations
// ============================================================================

impl DynSceneSource {
    /// Helper method to get metadata as a borrowed reference (for compatibility)
    pub fn metadata(&self) -> DynSceneMetadata<'_> {
        <Self as SceneSource>::metadata(self)
    }

    /// Returns the virtual source, if that is what is loaded.
    ///
    /// The viewer uses this to drive churn on a live virtual scene.
    pub fn as_virtual_mut(&mut self) -> Option<&mut crate::virtual_scene::VirtualSceneData> {
        match self {
            DynSceneSource::Virtual(data) => Some(data),
            _ => None,
        }
    }
}

impl SceneSource for DynSceneSource {
    type Metadata<'a> = DynSceneMetadata<'a> where Self: 'a;
    type Node<'a> = DynSceneNode<'a> where Self: 'a;

    #[inline]
    fn metadata(&self) -> Self::Metadata<'_> {
        match self {
            DynSceneSource::File(d) => DynSceneMetadata::File(d.metadata()),
            DynSceneSource::Virtual(d) => DynSceneMetadata::Virtual(d.metadata()),
        }
    }

    #[inline]
    fn groups(&self) -> Vec<SceneGroup> {
        match self {
            DynSceneSource::File(d) => d.groups(),
            DynSceneSource::Virtual(d) => d.groups(),
        }
    }

    #[inline]
    fn get_node(&self, id: NodeId) -> Option<Self::Node<'_>> {
        match self {
            DynSceneSource::File(d) => d.get_node(id).map(DynSceneNode::File),
            DynSceneSource::Virtual(d) => d.get_node(id).map(DynSceneNode::Virtual),
        }
    }
}

impl<'a> SceneMetadata for DynSceneMetadata<'a> {
    #[inline]
    fn version(&self) -> String {
        match self {
            DynSceneMetadata::File(m) => m.version(),
            DynSceneMetadata::Virtual(m) => m.version(),
        }
    }

    #[inline]
    fn header_data(&self) -> &serde_json::Value {
        match self {
            DynSceneMetadata::File(m) => m.header_data(),
            DynSceneMetadata::Virtual(m) => m.header_data(),
        }
    }

    #[inline]
    fn total_groups(&self) -> Option<usize> {
        match self {
            DynSceneMetadata::File(m) => m.total_groups(),
            DynSceneMetadata::Virtual(m) => m.total_groups(),
        }
    }

    #[inline]
    fn total_nodes(&self) -> Option<usize> {
        match self {
            DynSceneMetadata::File(m) => m.total_nodes(),
            DynSceneMetadata::Virtual(m) => m.total_nodes(),
        }
    }
}

impl<'a> SceneNode<'a> for DynSceneNode<'a> {
    #[inline]
    fn id(&self) -> NodeId {
        match self {
            DynSceneNode::File(n) => n.id(),
            DynSceneNode::Virtual(n) => n.id(),
        }
    }

    #[inline]
    fn display_name(&self) -> String {
        match self {
            DynSceneNode::File(n) => n.display_name(),
            DynSceneNode::Virtual(n) => n.display_name(),
        }
    }

    #[inline]
    fn is_active(&self) -> bool {
        match self {
            DynSceneNode::File(n) => n.is_active(),
            DynSceneNode::Virtual(n) => n.is_active(),
        }
    }

    #[inline]
    fn has_ignore_marker(&self) -> bool {
        match self {
            DynSceneNode::File(n) => n.has_ignore_marker(),
            DynSceneNode::Virtual(n) => n.has_ignore_marker(),
        }
    }

    #[inline]
    fn num_children(&self) -> usize {
        match self {
            DynSceneNode::File(n) => n.num_children(),
            DynSceneNode::Virtual(n) => n.num_children(),
        }
    }

    #[inline]
    fn child_at(&self, index: usize) -> Option<Self> {
        match self {
            DynSceneNode::File(n) => n.child_at(index).map(DynSceneNode::File),
            DynSceneNode::Virtual(n) => n.child_at(index).map(DynSceneNode::Virtual),
        }
    }

    #[inline]
    fn preferred_width(&self) -> f32 {
        match self {
            DynSceneNode::File(n) => n.preferred_width(),
            DynSceneNode::Virtual(n) => n.preferred_width(),
        }
    }

    #[inline]
    fn preferred_height(&self) -> f32 {
        match self {
            DynSceneNode::File(n) => n.preferred_height(),
            DynSceneNode::Virtual(n) => n.preferred_height(),
        }
    }
}
