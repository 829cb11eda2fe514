//! iCalendar component types (RFC 5545 §3.4-3.6).

use std::fmt;
use std::sync::Arc;

use almanac_core::constants::{DEFAULT_PRODID, ICALENDAR_VERSION};
use parking_lot::Mutex;

use super::Property;
use super::registry::{self, Cardinality};
use crate::error::{RfcError, RfcResult};

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VEVENT component.
    Event,
    /// VTODO component.
    Todo,
    /// VJOURNAL component.
    Journal,
    /// VFREEBUSY component.
    FreeBusy,
    /// VTIMEZONE component.
    Timezone,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// VALARM component (nested within VEVENT/VTODO).
    Alarm,
}

impl ComponentKind {
    pub const ALL: &'static [Self] = &[
        Self::Calendar,
        Self::Event,
        Self::Todo,
        Self::Journal,
        Self::FreeBusy,
        Self::Timezone,
        Self::Standard,
        Self::Daylight,
        Self::Alarm,
    ];

    /// Returns the `BEGIN`/`END` tag for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Event => "VEVENT",
            Self::Todo => "VTODO",
            Self::Journal => "VJOURNAL",
            Self::FreeBusy => "VFREEBUSY",
            Self::Timezone => "VTIMEZONE",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Alarm => "VALARM",
        }
    }

    /// Parses a component kind from its tag (case-insensitive).
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }

    /// Returns the child kinds this component may contain, in serialization order.
    #[must_use]
    pub const fn children(self) -> &'static [Self] {
        match self {
            Self::Calendar => &[
                Self::Timezone,
                Self::Event,
                Self::Todo,
                Self::Journal,
                Self::FreeBusy,
            ],
            Self::Event | Self::Todo => &[Self::Alarm],
            Self::Timezone => &[Self::Standard, Self::Daylight],
            Self::Journal | Self::FreeBusy | Self::Standard | Self::Daylight | Self::Alarm => &[],
        }
    }

    /// Returns whether `child` may be nested directly inside this kind.
    #[must_use]
    pub fn allows_child(self, child: Self) -> bool {
        self.children().contains(&child)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Default)]
struct State {
    properties: Vec<Property>,
    children: Vec<Arc<Component>>,
}

/// An iCalendar component.
///
/// A component owns an ordered property list and its child components. Every operation
/// locks the node for its duration, so concurrent calls on the same node are atomic with
/// respect to each other. Children are handed out as [`Arc`] handles that stay usable
/// while the parent is mutated.
///
/// Property accessors take either a registry key such as
/// [`EventProperty::Summary`](super::EventProperty::Summary) or a plain name; matching is
/// case-insensitive.
pub struct Component {
    kind: ComponentKind,
    state: Mutex<State>,
}

impl Component {
    /// Creates an empty component of the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            state: Mutex::new(State::default()),
        }
    }

    pub(crate) fn from_parts(
        kind: ComponentKind,
        properties: Vec<Property>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            kind,
            state: Mutex::new(State {
                properties,
                children: children.into_iter().map(Arc::new).collect(),
            }),
        }
    }

    /// Creates an empty VCALENDAR component.
    #[must_use]
    pub fn calendar() -> Self {
        Self::new(ComponentKind::Calendar)
    }

    /// Creates a VCALENDAR with the default `PRODID` and `VERSION:2.0`.
    #[must_use]
    pub fn default_calendar() -> Self {
        Self::from_parts(
            ComponentKind::Calendar,
            vec![
                Property::new(registry::CalendarProperty::ProdId.as_ref(), DEFAULT_PRODID),
                Property::new(registry::CalendarProperty::Version.as_ref(), ICALENDAR_VERSION),
            ],
            Vec::new(),
        )
    }

    /// Creates an empty VEVENT component.
    #[must_use]
    pub fn event() -> Self {
        Self::new(ComponentKind::Event)
    }

    /// Creates an empty VTODO component.
    #[must_use]
    pub fn todo() -> Self {
        Self::new(ComponentKind::Todo)
    }

    /// Creates an empty VJOURNAL component.
    #[must_use]
    pub fn journal() -> Self {
        Self::new(ComponentKind::Journal)
    }

    /// Creates an empty VFREEBUSY component.
    #[must_use]
    pub fn freebusy() -> Self {
        Self::new(ComponentKind::FreeBusy)
    }

    /// Creates an empty VTIMEZONE component.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    /// Creates an empty STANDARD observance.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ComponentKind::Standard)
    }

    /// Creates an empty DAYLIGHT observance.
    #[must_use]
    pub fn daylight() -> Self {
        Self::new(ComponentKind::Daylight)
    }

    /// Creates an empty VALARM component.
    #[must_use]
    pub fn alarm() -> Self {
        Self::new(ComponentKind::Alarm)
    }

    /// Returns the component kind.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Returns a copy of the property list and the child handles.
    ///
    /// The lock is released before returning.
    pub(crate) fn snapshot(&self) -> (Vec<Property>, Vec<Arc<Self>>) {
        let state = self.state.lock();
        (state.properties.clone(), state.children.clone())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Returns every property in stored order.
    #[must_use]
    pub fn all_properties(&self) -> Vec<Property> {
        self.state.lock().properties.clone()
    }

    /// Returns all properties with the given name, in stored order.
    #[must_use]
    pub fn properties(&self, key: impl AsRef<str>) -> Vec<Property> {
        let name = key.as_ref();
        self.state
            .lock()
            .properties
            .iter()
            .filter(|p| p.is_named(name))
            .cloned()
            .collect()
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, key: impl AsRef<str>) -> Option<Property> {
        let name = key.as_ref();
        self.state
            .lock()
            .properties
            .iter()
            .find(|p| p.is_named(name))
            .cloned()
    }

    /// Replaces the properties stored under `key`.
    ///
    /// Singletons keep only the first given property. Existing entries are replaced at the
    /// position of the first former match; without one, the new entries are placed in
    /// registry order. An empty list removes the entries.
    ///
    /// ## Errors
    /// Returns [`RfcError::Validation`] if `key` is neither registered for this kind nor an
    /// extension name.
    pub fn set(
        &self,
        key: impl AsRef<str>,
        properties: impl IntoIterator<Item = Property>,
    ) -> RfcResult<&Self> {
        let name = key.as_ref();
        self.check_name(name)?;
        let mut incoming = named(name, properties);
        if registry::cardinality_of(self.kind, name) == Cardinality::Singleton {
            incoming.truncate(1);
        }

        let mut state = self.state.lock();
        let props = &mut state.properties;
        let first = props.iter().position(|p| p.is_named(name));
        props.retain(|p| !p.is_named(name));
        let at = first.unwrap_or_else(|| registry_slot(self.kind, props, name));
        insert_all(props, at, incoming);
        Ok(self)
    }

    /// Adds properties under `key`.
    ///
    /// A singleton is overwritten in place by the first given property. Repeatable entries
    /// are inserted after the last existing match, or in registry order when there is none.
    ///
    /// ## Errors
    /// Returns [`RfcError::Validation`] if `key` is neither registered for this kind nor an
    /// extension name.
    pub fn add(
        &self,
        key: impl AsRef<str>,
        properties: impl IntoIterator<Item = Property>,
    ) -> RfcResult<&Self> {
        let name = key.as_ref();
        self.check_name(name)?;
        let incoming = named(name, properties);

        let mut state = self.state.lock();
        let props = &mut state.properties;
        match registry::cardinality_of(self.kind, name) {
            Cardinality::Singleton => {
                let Some(first) = incoming.into_iter().next() else {
                    return Ok(self);
                };
                if let Some(existing) = props.iter_mut().find(|p| p.is_named(name)) {
                    *existing = first;
                } else {
                    let at = registry_slot(self.kind, props, name);
                    props.insert(at, first);
                }
            }
            Cardinality::Repeatable => {
                let at = props
                    .iter()
                    .rposition(|p| p.is_named(name))
                    .map_or_else(|| registry_slot(self.kind, props, name), |i| i + 1);
                insert_all(props, at, incoming);
            }
        }
        Ok(self)
    }

    /// Only registered and extension names can be stored; the parser drops anything else.
    fn check_name(&self, name: &str) -> RfcResult<()> {
        if registry::position(self.kind, name).is_some() || registry::is_extension(name) {
            Ok(())
        } else {
            Err(RfcError::Validation(format!(
                "'{name}' is not a {} property",
                self.kind
            )))
        }
    }

    /// Removes every property with the given name.
    pub fn remove_all(&self, key: impl AsRef<str>) -> &Self {
        let name = key.as_ref();
        self.state.lock().properties.retain(|p| !p.is_named(name));
        self
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Returns every child component in insertion order.
    #[must_use]
    pub fn all_children(&self) -> Vec<Arc<Self>> {
        self.state.lock().children.clone()
    }

    /// Returns the children of the given kind in insertion order.
    #[must_use]
    pub fn children(&self, kind: ComponentKind) -> Vec<Arc<Self>> {
        self.state
            .lock()
            .children
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Event)
    }

    #[must_use]
    pub fn todos(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Todo)
    }

    #[must_use]
    pub fn journals(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Journal)
    }

    #[must_use]
    pub fn freebusys(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::FreeBusy)
    }

    #[must_use]
    pub fn timezones(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Timezone)
    }

    #[must_use]
    pub fn alarms(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Alarm)
    }

    #[must_use]
    pub fn standards(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Standard)
    }

    #[must_use]
    pub fn daylights(&self) -> Vec<Arc<Self>> {
        self.children(ComponentKind::Daylight)
    }

    /// Attaches a child component and returns a handle to it.
    ///
    /// ## Errors
    /// Returns [`RfcError::Validation`] if this kind cannot contain `child`'s kind.
    pub fn add_child(&self, child: Self) -> RfcResult<Arc<Self>> {
        if !self.kind.allows_child(child.kind) {
            return Err(RfcError::Validation(format!(
                "{} cannot contain {}",
                self.kind, child.kind
            )));
        }
        let child = Arc::new(child);
        self.state.lock().children.push(Arc::clone(&child));
        Ok(child)
    }

    /// Detaches the given child. Returns whether it was attached to this node.
    pub fn remove_child(&self, child: &Arc<Self>) -> bool {
        let mut state = self.state.lock();
        let before = state.children.len();
        state.children.retain(|c| !Arc::ptr_eq(c, child));
        state.children.len() != before
    }

    /// Detaches and returns every child of the given kind.
    pub fn remove_children(&self, kind: ComponentKind) -> Vec<Arc<Self>> {
        let mut state = self.state.lock();
        let (removed, kept) = std::mem::take(&mut state.children)
            .into_iter()
            .partition(|c| c.kind == kind);
        state.children = kept;
        removed
    }

    // ------------------------------------------------------------------
    // Convenience readers
    // ------------------------------------------------------------------

    /// Returns the UID as text.
    #[must_use]
    pub fn uid(&self) -> Option<String> {
        self.text_of("UID")
    }

    /// Returns the SUMMARY as text.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.text_of("SUMMARY")
    }

    /// Returns the first DESCRIPTION as text.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        self.text_of("DESCRIPTION")
    }

    /// Returns the VERSION of a calendar.
    #[must_use]
    pub fn version(&self) -> Option<String> {
        self.text_of("VERSION")
    }

    /// Returns the PRODID of a calendar.
    #[must_use]
    pub fn prodid(&self) -> Option<String> {
        self.text_of("PRODID")
    }

    fn text_of(&self, name: &str) -> Option<String> {
        self.property(name).map(|p| p.as_text())
    }
}

/// Names unnamed properties after `name` and renames mismatched ones, so every stored
/// entry matches the key it was stored under.
fn named(name: &str, properties: impl IntoIterator<Item = Property>) -> Vec<Property> {
    properties
        .into_iter()
        .map(|mut p| {
            p.rename(name);
            p
        })
        .collect()
}

/// Index at which a property absent from `props` is placed: after the last entry that
/// does not sort after it.
fn registry_slot(kind: ComponentKind, props: &[Property], name: &str) -> usize {
    let rank = registry::rank(kind, name);
    props
        .iter()
        .rposition(|p| registry::rank(kind, p.name()) <= rank)
        .map_or(0, |i| i + 1)
}

fn insert_all(props: &mut Vec<Property>, at: usize, incoming: Vec<Property>) {
    let tail = props.split_off(at);
    props.extend(incoming);
    props.extend(tail);
}

impl Clone for Component {
    fn clone(&self) -> Self {
        let (properties, children) = self.snapshot();
        Self {
            kind: self.kind,
            state: Mutex::new(State {
                properties,
                children: children
                    .iter()
                    .map(|c| Arc::new(Self::clone(c)))
                    .collect(),
            }),
        }
    }
}

/// Structural equality: kind, property list, and the children of each kind in order.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.kind != other.kind {
            return false;
        }
        let (props, children) = self.snapshot();
        let (other_props, other_children) = other.snapshot();
        props == other_props
            && children.len() == other_children.len()
            && self.kind.children().iter().all(|kind| {
                children
                    .iter()
                    .filter(|c| c.kind == *kind)
                    .eq(other_children.iter().filter(|c| c.kind == *kind))
            })
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (properties, children) = self.snapshot();
        f.debug_struct("Component")
            .field("kind", &self.kind)
            .field("properties", &properties)
            .field("children", &children)
            .finish()
    }
}
