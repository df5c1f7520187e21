//! Scene node handles
//!
//! The collision core never sees scene types. Selectors tag their
//! triangles with a [`NodeId`] so a collision result can name the node it
//! touched; the [`NodeRegistry`] is the minimal owner of those ids.

use slotmap::SlotMap;

use crate::foundation::math::Transform;

slotmap::new_key_type! {
    /// Handle to a scene node that owns collision geometry
    pub struct NodeId;
}

/// A named node with a world transform
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Display name, used in logs
    pub name: String,
    /// World placement of the node's geometry
    pub transform: Transform,
}

/// Storage for scene nodes, addressed by [`NodeId`]
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Add a node and return its handle
    pub fn insert(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        self.nodes.insert(SceneNode {
            name: name.into(),
            transform,
        })
    }
    
    /// Remove a node; stale handles stop resolving
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        self.nodes.remove(id)
    }
    
    /// Look up a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }
    
    /// Name of a node, if it still exists
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|node| node.name.as_str())
    }
    
    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    
    /// True when no nodes are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_insert_and_remove() {
        let mut registry = NodeRegistry::new();
        let wall = registry.insert("wall", Transform::identity());
        let floor = registry.insert("floor", Transform::identity());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name_of(wall), Some("wall"));
        
        registry.remove(wall);
        assert_eq!(registry.name_of(wall), None);
        assert_eq!(registry.name_of(floor), Some("floor"));
        assert!(!registry.is_empty());
    }
}
