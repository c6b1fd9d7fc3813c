/// In-memory provider that records every mutating call.
use super::errors::VibranceError;
use super::provider::VibranceProvider;
use super::state::VibranceState;

/// A mutating call observed by [`MockProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Set(i32),
    Toggle,
    Enable,
    Disable,
}

#[derive(Debug)]
pub struct MockProvider {
    pub state: VibranceState,
    pub calls: Vec<Call>,
    /// When set, every mutator fails with this status.
    pub fail_status: Option<i32>,
}

impl MockProvider {
    pub fn new(current: i32, min: i32, max: i32) -> Self {
        Self {
            state: VibranceState {
                version: 0x10010,
                current,
                min,
                max,
            },
            calls: Vec::new(),
            fail_status: None,
        }
    }

    fn record(&mut self, call: Call, level: i32) -> Result<(), VibranceError> {
        self.calls.push(call);
        if let Some(status) = self.fail_status {
            return Err(crate::nvapi::NvapiError::Status {
                call: "NvAPI_SetDVCLevel",
                status,
            }
            .into());
        }
        self.state.current = level;
        Ok(())
    }
}

impl VibranceProvider for MockProvider {
    fn query(&self) -> Result<VibranceState, VibranceError> {
        Ok(self.state)
    }

    fn set(&mut self, level: i32) -> Result<(), VibranceError> {
        self.record(Call::Set(level), level)
    }

    fn toggle(&mut self) -> Result<(), VibranceError> {
        let target = self.state.toggle_target();
        self.record(Call::Toggle, target)
    }

    fn enable(&mut self) -> Result<(), VibranceError> {
        let max = self.state.max;
        self.record(Call::Enable, max)
    }

    fn disable(&mut self) -> Result<(), VibranceError> {
        let min = self.state.min;
        self.record(Call::Disable, min)
    }
}
