use crate::error::CircuitError;

/// Default toggle interval for a freshly placed timer, in milliseconds.
pub const DEFAULT_TIMER_INTERVAL: u64 = 1000;

/// Private state of a timer component.
///
/// Timers are the only stateful components: the scheduler advances
/// `elapsed` every tick and flips `state` whenever it reaches `interval`.
/// The evaluator treats `state` as a fixed source value for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub interval: u64,
    pub elapsed: u64,
    pub state: bool,
}

impl TimerState {
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            elapsed: 0,
            state: false,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_TIMER_INTERVAL)
    }
}

/// The closed set of component kinds, each with a fixed pin arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    And,
    Or,
    Not,
    Timer(TimerState),
    Lamp,
}

impl ComponentKind {
    /// A timer with a custom toggle interval.
    pub fn timer(interval: u64) -> Self {
        Self::Timer(TimerState::new(interval))
    }

    /// Parses an external type tag. Unknown tags are the one condition the
    /// engine reports as an error rather than degrading.
    pub fn from_tag(tag: &str) -> Result<Self, CircuitError> {
        match tag {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "NOT" => Ok(Self::Not),
            "TIMER" => Ok(Self::Timer(TimerState::default())),
            "LAMP" => Ok(Self::Lamp),
            other => Err(CircuitError::InvalidType(other.to_owned())),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Timer(_) => "TIMER",
            Self::Lamp => "LAMP",
        }
    }

    /// Number of input pins, fixed for the component's lifetime.
    pub fn input_count(&self) -> usize {
        match self {
            Self::And | Self::Or => 2,
            Self::Not | Self::Lamp => 1,
            Self::Timer(_) => 0,
        }
    }

    /// Number of output pins, fixed for the component's lifetime.
    pub fn output_count(&self) -> usize {
        match self {
            Self::And | Self::Or | Self::Not | Self::Timer(_) => 1,
            Self::Lamp => 0,
        }
    }

    /// The kind's combinational function over its current input values.
    ///
    /// Returns `None` for kinds without an output pin. Timers ignore their
    /// (empty) inputs and emit their private toggle state; lamps only
    /// display their input and drive nothing downstream.
    pub fn eval(&self, inputs: &[bool]) -> Option<bool> {
        match self {
            Self::And => Some(inputs.iter().all(|&v| v)),
            Self::Or => Some(inputs.iter().any(|&v| v)),
            Self::Not => Some(!inputs.first().copied().unwrap_or(false)),
            Self::Timer(t) => Some(t.state),
            Self::Lamp => None,
        }
    }
}

/// A placed component: identity, kind, display label and pin values.
///
/// Pin vectors are allocated once at creation and their lengths never
/// change; the evaluator and scheduler are the only writers of pin values
/// and timer state.
#[derive(Debug, Clone)]
pub struct Component {
    pub(crate) id: u64,
    pub(crate) kind: ComponentKind,
    pub label: String,
    pub(crate) inputs: Vec<bool>,
    pub(crate) outputs: Vec<bool>,
}

impl Component {
    pub(crate) fn new(id: u64, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            label: kind.tag().to_owned(),
            inputs: vec![false; kind.input_count()],
            outputs: vec![false; kind.output_count()],
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn inputs(&self) -> &[bool] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[bool] {
        &self.outputs
    }

    /// Reconfigures the toggle interval. No effect on other kinds.
    pub fn set_interval(&mut self, interval: u64) {
        if let ComponentKind::Timer(t) = &mut self.kind {
            t.interval = interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_kind() {
        let cases = [
            (ComponentKind::And, 2, 1),
            (ComponentKind::Or, 2, 1),
            (ComponentKind::Not, 1, 1),
            (ComponentKind::Timer(TimerState::default()), 0, 1),
            (ComponentKind::Lamp, 1, 0),
        ];
        for (kind, inputs, outputs) in cases {
            let c = Component::new(1, kind);
            assert_eq!(c.inputs().len(), inputs, "{}", kind.tag());
            assert_eq!(c.outputs().len(), outputs, "{}", kind.tag());
        }
    }

    #[test]
    fn from_tag_rejects_unknown_types() {
        assert!(matches!(
            ComponentKind::from_tag("XOR"),
            Err(CircuitError::InvalidType(t)) if t == "XOR"
        ));
        assert_eq!(ComponentKind::from_tag("NOT").unwrap(), ComponentKind::Not);
    }

    #[test]
    fn combinational_functions() {
        assert_eq!(ComponentKind::And.eval(&[true, true]), Some(true));
        assert_eq!(ComponentKind::And.eval(&[true, false]), Some(false));
        assert_eq!(ComponentKind::Or.eval(&[false, false]), Some(false));
        assert_eq!(ComponentKind::Or.eval(&[false, true]), Some(true));
        assert_eq!(ComponentKind::Not.eval(&[false]), Some(true));
        assert_eq!(ComponentKind::Lamp.eval(&[true]), None);

        let mut t = TimerState::default();
        t.state = true;
        assert_eq!(ComponentKind::Timer(t).eval(&[]), Some(true));
    }

    #[test]
    fn label_defaults_to_type_name() {
        assert_eq!(Component::new(3, ComponentKind::Lamp).label, "LAMP");
    }
}
