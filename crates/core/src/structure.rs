//! Template structure: the forest of components that mirrors the document being authored.
//!
//! The visual editor owns the real DOM. This structure is parallel bookkeeping that lets the
//! UI show a structure browser, offer placement targets, and phrase placement decisions in
//! prompts.
//!
//! Invariants maintained by [`TemplateStructure::insert`]:
//! - every id in `root_components` and in any `children` list is a key of `components`;
//! - a component with `parent_id = p` appears exactly once in `components[p].children`;
//! - no id appears in more than one positional list;
//! - following `parent_id` links always terminates at a root.
//!
//! Two tolerated states break "every component is placed somewhere": components replaced by a
//! `replace` insertion stay registered but appear in no list (orphans), and a `before`/`after`
//! or `replace` insertion whose target cannot be found in its expected containing list leaves
//! the new component registered but unplaced. Neither is reported by
//! [`TemplateStructure::check_invariants`]; both are listed by
//! [`TemplateStructure::orphans`].

use crate::catalog::ComponentKind;
use crate::constants::AT_END_CLAUSE;
use crate::label::component_label;
use crate::options::{ComponentOptions, Placement, PlacementKind};
use pagewright_types::ComponentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A node of the template tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ComponentId>,
    /// Child ids in rendering order.
    #[serde(default)]
    pub children: Vec<ComponentId>,
    pub options: ComponentOptions,
}

/// The whole authored document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStructure {
    pub components: BTreeMap<ComponentId, Component>,
    /// Top-level document order.
    pub root_components: Vec<ComponentId>,
}

/// What an insertion did with the new component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum InsertOutcome {
    /// Appended to `root_components`, either requested (`at-end`) or as the fallback for a
    /// missing or unknown target.
    #[serde(rename_all = "camelCase")]
    AppendedToRoot { index: usize },

    /// Spliced into a list by `inside`, `before` or `after`.
    #[serde(rename_all = "camelCase")]
    Placed {
        parent_id: Option<ComponentId>,
        index: usize,
    },

    /// Took over the slot of `replaced_id`, which stays registered as an orphan.
    #[serde(rename_all = "camelCase")]
    Replaced {
        replaced_id: ComponentId,
        parent_id: Option<ComponentId>,
        index: usize,
    },

    /// Registered, but the target was missing from its expected containing list.
    Unplaced,

    /// The id was already registered; nothing changed.
    DuplicateId,
}

/// One entry of the depth-first document listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementTarget {
    pub id: ComponentId,
    pub label: String,
    pub depth: usize,
}

/// A broken structural invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "camelCase")]
pub enum StructureViolation {
    /// A positional list references an id that is not registered.
    DanglingId { id: ComponentId },
    /// `child.parent_id` names a parent whose children do not contain the child exactly once.
    ParentMismatch {
        child: ComponentId,
        parent: ComponentId,
    },
    /// A child list entry whose `parent_id` does not point back at the list owner.
    ChildMismatch {
        parent: ComponentId,
        child: ComponentId,
    },
    /// A root entry that records a parent.
    RootWithParent { id: ComponentId },
    /// An id placed in more than one list (or twice in one list).
    DuplicatePlacement { id: ComponentId },
    /// Following parent links from this id never reaches a root.
    Cycle { id: ComponentId },
}

impl TemplateStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    /// Registers a new component and places it according to `options.placement`.
    ///
    /// The component is always registered (unless `id` is already taken). Placement rules:
    /// - no target, an unknown target, or a target equal to `id` -> appended to the roots;
    /// - `at-end` -> appended to the roots;
    /// - `inside` -> appended to the target's children;
    /// - `before` / `after` -> spliced next to the target in its containing list, sharing the
    ///   target's parent;
    /// - `replace` -> takes the target's slot; the target stays registered, unplaced.
    ///
    /// When the target is missing from the list its own parent link points at, `before`,
    /// `after` and `replace` leave the new component unplaced instead of guessing a position.
    ///
    /// # Returns
    ///
    /// An [`InsertOutcome`] describing the decision. The structure itself is updated in place.
    pub fn insert(&mut self, id: ComponentId, options: ComponentOptions) -> InsertOutcome {
        if self.components.contains_key(&id) {
            tracing::warn!("component id {} is already registered, ignoring insert", id);
            return InsertOutcome::DuplicateId;
        }

        let placement = options.placement.clone().unwrap_or_default();
        let target_id = placement
            .target_id
            .filter(|target| *target != id && self.components.contains_key(target));

        let component = Component {
            id: id.clone(),
            kind: options.kind(),
            label: component_label(&options),
            parent_id: None,
            children: Vec::new(),
            options,
        };
        tracing::debug!("registering component {} ({})", id, component.label);
        self.components.insert(id.clone(), component);

        let Some(target_id) = target_id else {
            return self.append_to_root(id);
        };

        match placement.kind {
            PlacementKind::AtEnd => self.append_to_root(id),
            PlacementKind::Inside => self.place_inside(id, target_id),
            PlacementKind::Before | PlacementKind::After => {
                self.place_beside(id, target_id, placement.kind == PlacementKind::After)
            }
            PlacementKind::Replace => self.replace(id, target_id),
        }
    }

    /// Discards every component.
    pub fn reset(&mut self) {
        tracing::debug!("resetting template structure ({} components)", self.len());
        self.components.clear();
        self.root_components.clear();
    }

    /// Phrases a placement decision for a generation prompt.
    ///
    /// Returns an empty string when there is nothing to say: no placement, or a placement
    /// whose target cannot be resolved (unless it asks for `at-end`). An `at-end` placement
    /// always yields the at-end clause, whether or not its target resolves.
    pub fn describe_placement(&self, placement: Option<&Placement>) -> String {
        let Some(placement) = placement else {
            return String::new();
        };
        let target = placement
            .target_id
            .as_ref()
            .and_then(|id| self.components.get(id));

        match (placement.kind, target) {
            (PlacementKind::AtEnd, _) => AT_END_CLAUSE.to_string(),
            (_, None) => String::new(),
            (PlacementKind::Inside, Some(t)) => format!("place inside \"{}\"", t.label),
            (PlacementKind::After, Some(t)) => {
                format!("place immediately after \"{}\"", t.label)
            }
            (PlacementKind::Before, Some(t)) => {
                format!("place immediately before \"{}\"", t.label)
            }
            (PlacementKind::Replace, Some(t)) => format!("replace \"{}\"", t.label),
        }
    }

    /// Registered ids that appear in no positional list, in id order.
    ///
    /// These are components displaced by `replace` and components left unplaced by an
    /// unresolvable `before`/`after`/`replace`.
    pub fn orphans(&self) -> Vec<ComponentId> {
        let placed: HashSet<&ComponentId> = self
            .root_components
            .iter()
            .chain(self.components.values().flat_map(|c| c.children.iter()))
            .collect();

        self.components
            .keys()
            .filter(|id| !placed.contains(id))
            .cloned()
            .collect()
    }

    /// Every component reachable from the roots, depth-first in document order.
    pub fn placement_targets(&self) -> Vec<PlacementTarget> {
        let mut targets = Vec::new();
        let mut visited = HashSet::new();
        for id in &self.root_components {
            self.collect_targets(id, 0, &mut visited, &mut targets);
        }
        targets
    }

    /// Indented text rendering of the document tree.
    ///
    /// ```text
    /// - Section: Hero [A]
    ///   - Card [B]
    /// ```
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for target in self.placement_targets() {
            out.push_str(&"  ".repeat(target.depth));
            out.push_str(&format!("- {} [{}]\n", target.label, target.id));
        }
        out
    }

    /// Checks the structural invariants and returns every violation found.
    pub fn check_invariants(&self) -> Vec<StructureViolation> {
        let mut violations = Vec::new();
        let mut placements: HashMap<&ComponentId, usize> = HashMap::new();

        for id in &self.root_components {
            *placements.entry(id).or_default() += 1;
            match self.components.get(id) {
                None => violations.push(StructureViolation::DanglingId { id: id.clone() }),
                Some(c) if c.parent_id.is_some() => {
                    violations.push(StructureViolation::RootWithParent { id: id.clone() })
                }
                Some(_) => {}
            }
        }

        for parent in self.components.values() {
            for child_id in &parent.children {
                *placements.entry(child_id).or_default() += 1;
                match self.components.get(child_id) {
                    None => violations.push(StructureViolation::DanglingId {
                        id: child_id.clone(),
                    }),
                    Some(child) if child.parent_id.as_ref() != Some(&parent.id) => {
                        violations.push(StructureViolation::ChildMismatch {
                            parent: parent.id.clone(),
                            child: child_id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        let mut duplicates: Vec<&ComponentId> = placements
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect();
        duplicates.sort();
        violations.extend(
            duplicates
                .into_iter()
                .map(|id| StructureViolation::DuplicatePlacement { id: id.clone() }),
        );

        // Orphans keep the parent link they had when they were displaced.
        let orphans: HashSet<ComponentId> = self.orphans().into_iter().collect();
        for component in self.components.values() {
            let Some(parent_id) = &component.parent_id else {
                continue;
            };
            let listed = self
                .components
                .get(parent_id)
                .map(|p| p.children.iter().filter(|c| **c == component.id).count())
                .unwrap_or(0);
            if listed > 1 || (listed == 0 && !orphans.contains(&component.id)) {
                violations.push(StructureViolation::ParentMismatch {
                    child: component.id.clone(),
                    parent: parent_id.clone(),
                });
            }
            if !self.reaches_root(&component.id) {
                violations.push(StructureViolation::Cycle {
                    id: component.id.clone(),
                });
            }
        }

        violations
    }

    fn append_to_root(&mut self, id: ComponentId) -> InsertOutcome {
        self.root_components.push(id);
        InsertOutcome::AppendedToRoot {
            index: self.root_components.len() - 1,
        }
    }

    fn place_inside(&mut self, id: ComponentId, target_id: ComponentId) -> InsertOutcome {
        let index = match self.components.get_mut(&target_id) {
            Some(target) => {
                target.children.push(id.clone());
                target.children.len() - 1
            }
            None => return InsertOutcome::Unplaced,
        };
        self.set_parent(&id, Some(target_id.clone()));
        InsertOutcome::Placed {
            parent_id: Some(target_id),
            index,
        }
    }

    fn place_beside(
        &mut self,
        id: ComponentId,
        target_id: ComponentId,
        after: bool,
    ) -> InsertOutcome {
        let parent_id = self
            .components
            .get(&target_id)
            .and_then(|t| t.parent_id.clone());

        let Some(index) = self.splice(parent_id.as_ref(), &target_id, |list, target_index| {
            let index = if after { target_index + 1 } else { target_index };
            list.insert(index, id.clone());
            index
        }) else {
            tracing::warn!(
                "target {} not found in its containing list, component {} left unplaced",
                target_id,
                id
            );
            return InsertOutcome::Unplaced;
        };

        self.set_parent(&id, parent_id.clone());
        InsertOutcome::Placed { parent_id, index }
    }

    fn replace(&mut self, id: ComponentId, target_id: ComponentId) -> InsertOutcome {
        let parent_id = self
            .components
            .get(&target_id)
            .and_then(|t| t.parent_id.clone());

        let Some(index) = self.splice(parent_id.as_ref(), &target_id, |list, target_index| {
            list[target_index] = id.clone();
            target_index
        }) else {
            tracing::warn!(
                "target {} not found in its containing list, component {} left unplaced",
                target_id,
                id
            );
            return InsertOutcome::Unplaced;
        };

        tracing::debug!("component {} replaced {}, which is now orphaned", id, target_id);
        self.set_parent(&id, parent_id.clone());
        InsertOutcome::Replaced {
            replaced_id: target_id,
            parent_id,
            index,
        }
    }

    /// Runs `edit` on the list that should contain `target_id` (the parent's children, or the
    /// roots when `parent_id` is `None`) with the target's index. Returns `None` when the list
    /// or the target within it cannot be found.
    fn splice<F>(
        &mut self,
        parent_id: Option<&ComponentId>,
        target_id: &ComponentId,
        edit: F,
    ) -> Option<usize>
    where
        F: FnOnce(&mut Vec<ComponentId>, usize) -> usize,
    {
        let list = match parent_id {
            Some(parent_id) => &mut self.components.get_mut(parent_id)?.children,
            None => &mut self.root_components,
        };
        let target_index = list.iter().position(|c| c == target_id)?;
        Some(edit(list, target_index))
    }

    fn set_parent(&mut self, id: &ComponentId, parent_id: Option<ComponentId>) {
        if let Some(component) = self.components.get_mut(id) {
            component.parent_id = parent_id;
        }
    }

    fn reaches_root(&self, id: &ComponentId) -> bool {
        let mut current = id;
        for _ in 0..=self.components.len() {
            match self.components.get(current).and_then(|c| c.parent_id.as_ref()) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
        false
    }

    fn collect_targets<'a>(
        &'a self,
        id: &'a ComponentId,
        depth: usize,
        visited: &mut HashSet<&'a ComponentId>,
        out: &mut Vec<PlacementTarget>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let Some(component) = self.components.get(id) else {
            return;
        };
        out.push(PlacementTarget {
            id: id.clone(),
            label: component.label.clone(),
            depth,
        });
        for child in &component.children {
            self.collect_targets(child, depth + 1, visited, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CardOptions, ComponentDetails};

    fn id(s: &str) -> ComponentId {
        ComponentId::new(s).unwrap()
    }

    fn section() -> ComponentOptions {
        ComponentOptions::new(ComponentDetails::Section)
    }

    fn card() -> ComponentOptions {
        ComponentOptions::new(ComponentDetails::Card(CardOptions::default()))
    }

    fn placed(options: ComponentOptions, target: &str, kind: PlacementKind) -> ComponentOptions {
        options.with_placement(Placement::relative_to(id(target), kind))
    }

    fn roots(structure: &TemplateStructure) -> Vec<&str> {
        structure.root_components.iter().map(|c| c.as_str()).collect()
    }

    fn children<'a>(structure: &'a TemplateStructure, parent: &str) -> Vec<&'a str> {
        structure.components[&id(parent)]
            .children
            .iter()
            .map(|c| c.as_str())
            .collect()
    }

    fn structure_ab() -> TemplateStructure {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), section());
        structure
    }

    #[test]
    fn test_scenario_card_inside_section() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        let outcome = structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));

        assert_eq!(
            outcome,
            InsertOutcome::Placed {
                parent_id: Some(id("A")),
                index: 0
            }
        );
        assert_eq!(children(&structure, "A"), vec!["B"]);
        assert_eq!(structure.components[&id("B")].parent_id, Some(id("A")));
        assert_eq!(roots(&structure), vec!["A"]);
        assert!(structure.check_invariants().is_empty());
    }

    #[test]
    fn test_unknown_target_falls_back_to_end_of_roots() {
        let mut structure = structure_ab();
        let options = placed(card(), "nonexistent", PlacementKind::Inside);
        let outcome = structure.insert(id("C"), options);

        assert_eq!(outcome, InsertOutcome::AppendedToRoot { index: 2 });
        assert_eq!(roots(&structure), vec!["A", "B", "C"]);
        assert!(structure.components[&id("C")].parent_id.is_none());
    }

    #[test]
    fn test_missing_placement_appends_to_roots() {
        let structure = structure_ab();
        assert_eq!(roots(&structure), vec!["A", "B"]);
    }

    #[test]
    fn test_after_inserts_behind_target() {
        let mut structure = structure_ab();
        structure.insert(id("C"), placed(card(), "B", PlacementKind::After));
        assert_eq!(roots(&structure), vec!["A", "B", "C"]);

        let mut structure = structure_ab();
        structure.insert(id("C"), placed(card(), "A", PlacementKind::After));
        assert_eq!(roots(&structure), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_before_inserts_ahead_of_target() {
        let mut structure = structure_ab();
        structure.insert(id("C"), placed(card(), "B", PlacementKind::Before));
        assert_eq!(roots(&structure), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_before_and_after_inherit_the_target_parent() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        structure.insert(id("C"), placed(card(), "B", PlacementKind::Before));
        structure.insert(id("D"), placed(card(), "B", PlacementKind::After));

        assert_eq!(children(&structure, "A"), vec!["C", "B", "D"]);
        assert_eq!(structure.components[&id("C")].parent_id, Some(id("A")));
        assert_eq!(structure.components[&id("D")].parent_id, Some(id("A")));
        assert_eq!(roots(&structure), vec!["A"]);
        assert!(structure.check_invariants().is_empty());
    }

    #[test]
    fn test_replace_takes_the_slot_and_orphans_the_target() {
        let mut structure = structure_ab();
        let outcome = structure.insert(id("C"), placed(card(), "B", PlacementKind::Replace));

        assert_eq!(
            outcome,
            InsertOutcome::Replaced {
                replaced_id: id("B"),
                parent_id: None,
                index: 1
            }
        );
        assert_eq!(roots(&structure), vec!["A", "C"]);
        assert!(structure.components.contains_key(&id("B")));
        assert_eq!(structure.orphans(), vec![id("B")]);
        assert!(structure.check_invariants().is_empty());
    }

    #[test]
    fn test_replace_inside_a_parent_inherits_it() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        structure.insert(id("C"), placed(card(), "B", PlacementKind::Replace));

        assert_eq!(children(&structure, "A"), vec!["C"]);
        assert_eq!(structure.components[&id("C")].parent_id, Some(id("A")));
        // The orphan keeps its own fields untouched.
        assert_eq!(structure.components[&id("B")].parent_id, Some(id("A")));
        assert_eq!(structure.orphans(), vec![id("B")]);
        assert!(structure.check_invariants().is_empty());
    }

    #[test]
    fn test_at_end_with_a_known_target_appends_to_roots() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        let outcome = structure.insert(id("C"), placed(card(), "B", PlacementKind::AtEnd));

        assert_eq!(outcome, InsertOutcome::AppendedToRoot { index: 1 });
        assert_eq!(roots(&structure), vec!["A", "C"]);
    }

    #[test]
    fn test_self_targeting_insert_cannot_create_a_cycle() {
        let mut structure = TemplateStructure::new();
        let outcome = structure.insert(id("A"), placed(section(), "A", PlacementKind::Inside));

        assert_eq!(outcome, InsertOutcome::AppendedToRoot { index: 0 });
        assert!(structure.components[&id("A")].children.is_empty());
        assert!(structure.check_invariants().is_empty());
    }

    #[test]
    fn test_duplicate_id_is_ignored() {
        let mut structure = structure_ab();
        let before = structure.clone();
        let outcome = structure.insert(id("A"), card());

        assert_eq!(outcome, InsertOutcome::DuplicateId);
        assert_eq!(structure, before);
    }

    // Known-ambiguous case: the target's recorded parent does not list it. The insertion is a
    // silent no-op for placement; the component stays registered but unplaced.
    #[test]
    fn test_inconsistent_linkage_leaves_component_unplaced() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        structure
            .components
            .get_mut(&id("A"))
            .unwrap()
            .children
            .clear();

        let outcome = structure.insert(id("C"), placed(card(), "B", PlacementKind::After));

        assert_eq!(outcome, InsertOutcome::Unplaced);
        assert!(structure.components.contains_key(&id("C")));
        assert!(structure.components[&id("C")].parent_id.is_none());
        assert!(structure.orphans().contains(&id("C")));
        assert_eq!(roots(&structure), vec!["A"]);
    }

    #[test]
    fn test_before_targeting_an_orphan_is_a_no_op() {
        let mut structure = structure_ab();
        structure.insert(id("C"), placed(card(), "B", PlacementKind::Replace));
        let outcome = structure.insert(id("D"), placed(card(), "B", PlacementKind::Before));

        assert_eq!(outcome, InsertOutcome::Unplaced);
        assert_eq!(roots(&structure), vec!["A", "C"]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut structure = structure_ab();
        structure.insert(id("C"), placed(card(), "A", PlacementKind::Inside));
        structure.reset();

        assert!(structure.components.is_empty());
        assert!(structure.root_components.is_empty());
        assert!(structure.is_empty());
    }

    #[test]
    fn test_every_insert_sequence_keeps_invariants() {
        let kinds = [
            PlacementKind::Inside,
            PlacementKind::Before,
            PlacementKind::After,
            PlacementKind::Replace,
            PlacementKind::AtEnd,
        ];
        let mut structure = TemplateStructure::new();
        structure.insert(id("n0"), section());

        for i in 1..60 {
            let target = format!("n{}", (i * 7 + 3) % i);
            let kind = kinds[i % kinds.len()];
            structure.insert(id(&format!("n{i}")), placed(card(), &target, kind));

            assert!(
                structure.check_invariants().is_empty(),
                "violations after n{i}: {:?}",
                structure.check_invariants()
            );
        }

        // Each placed id appears exactly once; orphans appear nowhere.
        let orphans: HashSet<_> = structure.orphans().into_iter().collect();
        let mut seen = HashSet::new();
        let lists = structure
            .root_components
            .iter()
            .chain(structure.components.values().flat_map(|c| c.children.iter()));
        for listed in lists {
            assert!(seen.insert(listed.clone()), "{listed} listed twice");
            assert!(!orphans.contains(listed));
        }
        assert_eq!(seen.len() + orphans.len(), structure.len());
    }

    #[test]
    fn test_check_invariants_reports_broken_structures() {
        let mut structure = structure_ab();
        structure.root_components.push(id("ghost"));
        structure.root_components.push(id("A"));
        structure.components.get_mut(&id("B")).unwrap().parent_id = Some(id("A"));

        let violations = structure.check_invariants();
        assert!(violations.contains(&StructureViolation::DanglingId { id: id("ghost") }));
        assert!(violations.contains(&StructureViolation::DuplicatePlacement { id: id("A") }));
        assert!(violations.contains(&StructureViolation::RootWithParent { id: id("B") }));
        assert!(violations.contains(&StructureViolation::ParentMismatch {
            child: id("B"),
            parent: id("A")
        }));
    }

    #[test]
    fn test_check_invariants_detects_cycles() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        structure.components.get_mut(&id("A")).unwrap().parent_id = Some(id("B"));
        structure.components.get_mut(&id("B")).unwrap().children.push(id("A"));

        let violations = structure.check_invariants();
        assert!(violations.contains(&StructureViolation::Cycle { id: id("A") }));
    }

    #[test]
    fn test_describe_placement_phrases_each_kind() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section().with_title("Hero"));

        let describe = |kind| {
            structure.describe_placement(Some(&Placement::relative_to(id("A"), kind)))
        };
        assert_eq!(describe(PlacementKind::Inside), "place inside \"Section: Hero\"");
        assert_eq!(
            describe(PlacementKind::After),
            "place immediately after \"Section: Hero\""
        );
        assert_eq!(
            describe(PlacementKind::Before),
            "place immediately before \"Section: Hero\""
        );
        assert_eq!(describe(PlacementKind::Replace), "replace \"Section: Hero\"");
        assert_eq!(describe(PlacementKind::AtEnd), AT_END_CLAUSE);
    }

    #[test]
    fn test_describe_placement_without_resolvable_target() {
        let structure = structure_ab();
        assert_eq!(structure.describe_placement(None), "");
        assert_eq!(
            structure.describe_placement(Some(&Placement::at_end())),
            AT_END_CLAUSE
        );
        let unknown = Placement::relative_to(id("zzz"), PlacementKind::Inside);
        assert_eq!(structure.describe_placement(Some(&unknown)), "");
    }

    #[test]
    fn test_outline_and_targets_follow_document_order() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section().with_title("Hero"));
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));
        structure.insert(id("C"), section());

        let targets = structure.placement_targets();
        let order: Vec<_> = targets.iter().map(|t| (t.id.as_str(), t.depth)).collect();
        assert_eq!(order, vec![("A", 0), ("B", 1), ("C", 0)]);

        assert_eq!(
            structure.outline(),
            "- Section: Hero [A]\n  - Card [B]\n- Section [C]\n"
        );
    }

    #[test]
    fn test_structure_serialises_with_editor_field_names() {
        let mut structure = TemplateStructure::new();
        structure.insert(id("A"), section());
        structure.insert(id("B"), placed(card(), "A", PlacementKind::Inside));

        let json = serde_json::to_value(&structure).unwrap();
        assert_eq!(json["rootComponents"], serde_json::json!(["A"]));
        assert_eq!(json["components"]["B"]["parentId"], "A");
        assert_eq!(json["components"]["B"]["type"], "card");
        assert_eq!(json["components"]["A"]["children"], serde_json::json!(["B"]));
    }
}
