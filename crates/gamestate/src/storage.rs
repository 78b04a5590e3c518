use std::collections::BTreeMap;

use crate::component::{Component, ComponentType, Move, Position};

/// Type-keyed component storage of one entity.
///
/// Holds at most one component per [`ComponentType`]. Inserting a component
/// of a type that is already present replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMap {
    components: BTreeMap<ComponentType, Component>,
}

impl ComponentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the component's own type; returns the replaced component.
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        self.components.insert(component.component_type(), component)
    }

    pub fn contains(&self, ty: ComponentType) -> bool {
        self.components.contains_key(&ty)
    }

    pub fn get(&self, ty: ComponentType) -> Option<&Component> {
        self.components.get(&ty)
    }

    pub fn get_mut(&mut self, ty: ComponentType) -> Option<&mut Component> {
        self.components.get_mut(&ty)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Attached component types in tag order.
    pub fn types(&self) -> impl Iterator<Item = ComponentType> + '_ {
        self.components.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn position(&self) -> Option<&Position> {
        match self.components.get(&ComponentType::Position) {
            Some(Component::Position(p)) => Some(p),
            _ => None,
        }
    }

    pub fn position_mut(&mut self) -> Option<&mut Position> {
        match self.components.get_mut(&ComponentType::Position) {
            Some(Component::Position(p)) => Some(p),
            _ => None,
        }
    }

    pub fn movement(&self) -> Option<&Move> {
        match self.components.get(&ComponentType::Move) {
            Some(Component::Move(m)) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Idle, Ownership};
    use glam::Vec3;
    use strata_common::{PlayerId, Time};

    #[test]
    fn insert_and_contains() {
        let mut map = ComponentMap::new();
        assert!(map.is_empty());
        assert!(map.insert(Idle::new("idle").into()).is_none());
        assert!(map.contains(ComponentType::Idle));
        assert!(!map.contains(ComponentType::Position));
        assert!(map.get(ComponentType::Position).is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn insert_replaces_same_type() {
        let mut map = ComponentMap::new();
        map.insert(Position::new(Time::ZERO, Vec3::ZERO, 0.0).into());
        let old = map.insert(Position::new(Time::ZERO, Vec3::ONE, 0.0).into());

        assert!(matches!(old, Some(Component::Position(_))));
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.position().unwrap().position_at(Time::ZERO),
            Some(Vec3::ONE)
        );
    }

    #[test]
    fn types_are_ordered_by_tag() {
        let mut map = ComponentMap::new();
        map.insert(Move::new("move", 2.0).into());
        map.insert(Ownership::new(Time::ZERO, PlayerId(1)).into());
        map.insert(Position::default().into());
        let types: Vec<ComponentType> = map.types().collect();
        assert_eq!(
            types,
            vec![
                ComponentType::Position,
                ComponentType::Ownership,
                ComponentType::Move
            ]
        );
    }

    #[test]
    fn typed_accessors() {
        let mut map = ComponentMap::new();
        assert!(map.position().is_none());
        assert!(map.movement().is_none());
        map.insert(Move::new("move", 2.5).into());
        map.insert(Position::new(Time::ZERO, Vec3::ZERO, 0.0).into());
        assert_eq!(map.movement().unwrap().speed, 2.5);
        map.position_mut()
            .unwrap()
            .set_position(Time(1.0), Vec3::X);
        assert_eq!(map.position().unwrap().position_at(Time(1.0)), Some(Vec3::X));
    }
}
