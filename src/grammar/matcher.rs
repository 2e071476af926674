//! Child sequence matching
//!
//! A two-pointer walk over the children of one element and the slots of its
//! context. The grammar pointer only moves forward: a particle is left once
//! its cardinality is satisfied and the next child does not match it, and
//! the first child taken into an exclusive branch commits the slot to that
//! branch for the rest of the element.

use super::content::{Particle, Slot};
use super::ParsingContext;
use crate::error::ParseErrorKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Position {
    slot: usize,
    branch: Option<usize>,
    item: usize,
    count: u32,
}

/// Matches the child elements of one element against a slot list
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    slots: &'static [Slot],
    position: Position,
    last: Option<Position>,
    committed: Vec<(usize, usize)>,
}

impl ContentMatcher {
    /// Start matching at the first slot
    pub fn new(slots: &'static [Slot]) -> Self {
        Self {
            slots,
            position: Position::default(),
            last: None,
            committed: Vec::new(),
        }
    }

    /// Accept the next child, given its XSD local name and its literal tag
    ///
    /// Returns the context the child must be parsed in.
    pub fn accept(
        &mut self,
        local_name: &str,
        tag: &str,
    ) -> Result<ParsingContext, ParseErrorKind> {
        let slots = self.slots;
        let start = self.position;

        loop {
            let Some(slot) = slots.get(self.position.slot) else {
                return Err(self.reject(start, local_name, tag));
            };

            match slot {
                Slot::Particle(particle) => {
                    if let Some(context) = self.take(particle, local_name) {
                        return Ok(context);
                    }
                    if particle.occurs.is_missing(self.position.count) {
                        return Err(missing(particle.tags().collect(), Some(tag)));
                    }
                    self.next_slot();
                }
                Slot::Exclusive(branches) => match self.position.branch {
                    Some(branch) => {
                        let items = branches[branch];
                        let particle = &items[self.position.item];
                        if let Some(context) = self.take(particle, local_name) {
                            return Ok(context);
                        }
                        if particle.occurs.is_missing(self.position.count) {
                            return Err(missing(particle.tags().collect(), Some(tag)));
                        }
                        if self.position.item + 1 < items.len() {
                            self.position.item += 1;
                            self.position.count = 0;
                        } else {
                            self.next_slot();
                        }
                    }
                    None => {
                        if let Some(context) = self.commit(*branches, local_name) {
                            return Ok(context);
                        }
                        if !branches.iter().any(|b| is_emptiable(b)) {
                            return Err(missing(branch_heads(branches), Some(tag)));
                        }
                        self.next_slot();
                    }
                },
            }
        }
    }

    /// Check that every required particle after the last child is satisfied
    pub fn finish(&self) -> Result<(), ParseErrorKind> {
        let mut position = self.position;

        while let Some(slot) = self.slots.get(position.slot) {
            match slot {
                Slot::Particle(particle) => {
                    if particle.occurs.is_missing(position.count) {
                        return Err(missing(particle.tags().collect(), None));
                    }
                }
                Slot::Exclusive(branches) => match position.branch {
                    Some(branch) => {
                        let items = branches[branch];
                        if items[position.item].occurs.is_missing(position.count) {
                            return Err(missing(items[position.item].tags().collect(), None));
                        }
                        if let Some(p) = items[position.item + 1..]
                            .iter()
                            .find(|p| !p.occurs.is_emptiable())
                        {
                            return Err(missing(p.tags().collect(), None));
                        }
                    }
                    None => {
                        if !branches.iter().any(|b| is_emptiable(b)) {
                            return Err(missing(branch_heads(branches), None));
                        }
                    }
                },
            }
            position = Position {
                slot: position.slot + 1,
                ..Position::default()
            };
        }

        Ok(())
    }

    /// Reject a child that no particle can match, such as a foreign element
    pub fn unexpected(&self, tag: &str) -> ParseErrorKind {
        ParseErrorKind::UnexpectedElement {
            element: tag.to_string(),
            expected: self.expected_from(self.position),
        }
    }

    fn take(&mut self, particle: &Particle, local_name: &str) -> Option<ParsingContext> {
        let context = particle.find(local_name)?;
        if particle.occurs.is_over(self.position.count) {
            return None;
        }
        self.position.count += 1;
        self.last = Some(self.position);
        Some(context)
    }

    fn commit(
        &mut self,
        branches: &'static [&'static [Particle]],
        local_name: &str,
    ) -> Option<ParsingContext> {
        for (b, items) in branches.iter().enumerate() {
            for (i, particle) in items.iter().enumerate() {
                if let Some(context) = particle.find(local_name) {
                    self.position.branch = Some(b);
                    self.position.item = i;
                    self.position.count = 1;
                    self.last = Some(self.position);
                    self.committed.push((self.position.slot, b));
                    return Some(context);
                }
                if !particle.occurs.is_emptiable() {
                    break;
                }
            }
        }
        None
    }

    fn next_slot(&mut self) {
        self.position = Position {
            slot: self.position.slot + 1,
            ..Position::default()
        };
    }

    fn particle_at(&self, position: Position) -> Option<&'static Particle> {
        let slots = self.slots;
        match slots.get(position.slot)? {
            Slot::Particle(particle) => Some(particle),
            Slot::Exclusive(branches) => branches[position.branch?].get(position.item),
        }
    }

    /// Particles on the matched path strictly before `until`
    fn particles_before(&self, until: Position) -> Vec<&'static Particle> {
        let slots = self.slots;
        let mut particles = Vec::new();
        for (index, slot) in slots.iter().enumerate().take(until.slot + 1) {
            match slot {
                Slot::Particle(particle) if index < until.slot => particles.push(particle),
                Slot::Particle(_) => {}
                Slot::Exclusive(branches) => {
                    let chosen = self
                        .committed
                        .iter()
                        .find(|(s, _)| *s == index)
                        .map(|(_, b)| *b);
                    if let Some(branch) = chosen {
                        let limit = if index < until.slot {
                            branches[branch].len()
                        } else {
                            until.item
                        };
                        particles.extend(branches[branch].iter().take(limit));
                    }
                }
            }
        }
        particles
    }

    fn reject(&self, start: Position, local_name: &str, tag: &str) -> ParseErrorKind {
        let expected = self.expected_from(start);
        let element = tag.to_string();

        let Some(last) = self.last else {
            return ParseErrorKind::UnexpectedElement { element, expected };
        };
        let exceeded = self
            .particle_at(last)
            .map(|p| p.find(local_name).is_some())
            .unwrap_or(false);
        let earlier = self
            .particles_before(last)
            .iter()
            .any(|p| p.find(local_name).is_some());

        if earlier && !exceeded {
            ParseErrorKind::OutOfOrderElement { element, expected }
        } else {
            ParseErrorKind::UnexpectedElement { element, expected }
        }
    }

    /// Describe what the grammar would accept from `position` on
    fn expected_from(&self, mut position: Position) -> String {
        let mut tags: Vec<String> = Vec::new();
        let mut push = |particle: &Particle, count: u32| {
            if !particle.occurs.is_over(count) {
                for tag in particle.tags() {
                    if !tags.contains(&tag) {
                        tags.push(tag);
                    }
                }
            }
        };

        'slots: while let Some(slot) = self.slots.get(position.slot) {
            match slot {
                Slot::Particle(particle) => {
                    push(particle, position.count);
                    if particle.occurs.is_missing(position.count) {
                        break 'slots;
                    }
                }
                Slot::Exclusive(branches) => match position.branch {
                    Some(branch) => {
                        for (i, particle) in branches[branch].iter().enumerate().skip(position.item) {
                            let count = if i == position.item { position.count } else { 0 };
                            push(particle, count);
                            if particle.occurs.is_missing(count) {
                                break 'slots;
                            }
                        }
                    }
                    None => {
                        for items in branches.iter() {
                            for particle in items.iter() {
                                push(particle, 0);
                                if !particle.occurs.is_emptiable() {
                                    break;
                                }
                            }
                        }
                        if !branches.iter().any(|b| is_emptiable(b)) {
                            break 'slots;
                        }
                    }
                },
            }
            position = Position {
                slot: position.slot + 1,
                ..Position::default()
            };
        }

        describe(&tags).unwrap_or_else(|| "no more elements".to_string())
    }
}

fn is_emptiable(branch: &[Particle]) -> bool {
    branch.iter().all(|p| p.occurs.is_emptiable())
}

fn branch_heads(branches: &[&[Particle]]) -> Vec<String> {
    let mut tags = Vec::new();
    for items in branches {
        for particle in items.iter() {
            tags.extend(particle.tags());
            if !particle.occurs.is_emptiable() {
                break;
            }
        }
    }
    tags
}

fn describe(tags: &[String]) -> Option<String> {
    match tags {
        [] => None,
        [one] => Some(one.clone()),
        many => Some(format!("one of {}", many.join(", "))),
    }
}

fn missing(tags: Vec<String>, found: Option<&str>) -> ParseErrorKind {
    ParseErrorKind::MissingRequiredElement {
        element: describe(&tags).unwrap_or_default(),
        found: found.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Content, ParsingContext};

    fn matcher(context: ParsingContext) -> ContentMatcher {
        match context.content() {
            Content::Elements(slots) => ContentMatcher::new(slots),
            Content::Any => panic!("{} has open content", context),
        }
    }

    fn run(context: ParsingContext, children: &[&str]) -> Result<Vec<ParsingContext>, ParseErrorKind> {
        let mut m = matcher(context);
        let mut out = Vec::new();
        for child in children {
            out.push(m.accept(child, &format!("xs:{}", child))?);
        }
        m.finish()?;
        Ok(out)
    }

    #[test]
    fn test_identity_constraint_sequence() {
        let parsed = run(ParsingContext::Key, &["annotation", "selector", "field", "field"]).unwrap();
        assert_eq!(
            parsed,
            vec![
                ParsingContext::Annotation,
                ParsingContext::Selector,
                ParsingContext::Field,
                ParsingContext::Field,
            ]
        );
    }

    #[test]
    fn test_missing_required_element() {
        let err = run(ParsingContext::Key, &["field"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required element xs:selector, found 'xs:field'"
        );

        let err = run(ParsingContext::Key, &["selector"]).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::MissingRequiredElement {
                element: "xs:field".to_string(),
                found: None
            }
        );

        let err = run(ParsingContext::LocalSimpleType, &["annotation"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::MissingRequiredElement { element, .. }
            if element == "one of xs:restriction, xs:list, xs:union"));
    }

    #[test]
    fn test_out_of_order_and_exceeded() {
        let err = run(ParsingContext::LocalSimpleType, &["list", "annotation"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::OutOfOrderElement { .. }), "{:?}", err);

        let err = run(ParsingContext::LocalSimpleType, &["list", "list"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::UnexpectedElement { .. }), "{:?}", err);

        let err = run(ParsingContext::NarrowElement, &["unique", "complexType"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::OutOfOrderElement { .. }), "{:?}", err);

        let err = run(ParsingContext::Selector, &["element"]).unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::UnexpectedElement {
                element: "xs:element".to_string(),
                expected: "xs:annotation".to_string(),
            }
        );
    }

    #[test]
    fn test_complex_type_branches_are_exclusive() {
        run(ParsingContext::LocalComplexType, &[]).unwrap();
        run(ParsingContext::LocalComplexType, &["annotation", "simpleContent"]).unwrap();
        run(
            ParsingContext::LocalComplexType,
            &["sequence", "attribute", "attributeGroup", "anyAttribute"],
        )
        .unwrap();
        run(ParsingContext::LocalComplexType, &["attribute"]).unwrap();

        let err = run(ParsingContext::LocalComplexType, &["simpleContent", "complexContent"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::UnexpectedElement { .. }), "{:?}", err);

        let err = run(ParsingContext::LocalComplexType, &["sequence", "simpleContent"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::UnexpectedElement { .. }), "{:?}", err);

        let err = run(ParsingContext::LocalComplexType, &["attribute", "sequence"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::OutOfOrderElement { .. }), "{:?}", err);

        let err = run(ParsingContext::LocalComplexType, &["sequence", "choice"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::UnexpectedElement { .. }), "{:?}", err);
    }

    #[test]
    fn test_schema_interleaving() {
        run(
            ParsingContext::Schema,
            &["annotation", "import", "include", "element", "annotation", "complexType"],
        )
        .unwrap();
        let err = run(ParsingContext::Schema, &["element", "import"]).unwrap_err();
        assert!(matches!(err, ParseErrorKind::OutOfOrderElement { .. }), "{:?}", err);
    }

    #[test]
    fn test_expected_lists_reachable_elements() {
        let err = run(ParsingContext::NarrowElement, &["annotation", "selector"]).unwrap_err();
        match err {
            ParseErrorKind::UnexpectedElement { expected, .. } => assert_eq!(
                expected,
                "one of xs:simpleType, xs:complexType, xs:unique, xs:key, xs:keyref"
            ),
            other => panic!("{:?}", other),
        }
    }
}
