//! Recording transport for driver tests

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use crate::interface::DisplayInterface;

/// One bus transfer as seen by the controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Transfer {
    Command(u8),
    Data(Vec<u8>),
    Read(usize),
}

/// In-memory [`DisplayInterface`] that records every call
#[derive(Debug, Default)]
pub(crate) struct MockInterface {
    pub transfers: Vec<Transfer>,
    pub resets: Vec<(PinState, u32)>,
    pub busy_waits: Vec<(PinState, u16)>,
    /// Byte returned by every read
    pub read_value: u8,
    /// Index of the busy wait that reports a timeout
    pub timeout_at: Option<usize>,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose `n`th busy wait (zero based) times out
    pub fn with_timeout_at(n: usize) -> Self {
        Self {
            timeout_at: Some(n),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<u8> {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// All data bytes in order, regardless of command
    pub fn data_bytes(&self) -> Vec<u8> {
        self.transfers
            .iter()
            .filter_map(|t| match t {
                Transfer::Data(d) => Some(d.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Each command paired with the concatenated data that followed it
    pub fn command_data(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for transfer in &self.transfers {
            match transfer {
                Transfer::Command(c) => out.push((*c, Vec::new())),
                Transfer::Data(d) => {
                    if let Some((_, payload)) = out.last_mut() {
                        payload.extend_from_slice(d);
                    }
                }
                Transfer::Read(_) => {}
            }
        }
        out
    }

    /// Payload of the first occurrence of `command`
    pub fn payload(&self, command: u8) -> Option<Vec<u8>> {
        self.command_data()
            .into_iter()
            .find(|(c, _)| *c == command)
            .map(|(_, data)| data)
    }

    pub fn clear(&mut self) {
        self.transfers.clear();
        self.resets.clear();
        self.busy_waits.clear();
    }
}

impl DisplayInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.transfers.push(Transfer::Command(command));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.transfers.push(Transfer::Data(data.to_vec()));
        Ok(())
    }

    fn read_data(&mut self, buffer: &mut [u8]) -> Result<(), Self::Error> {
        buffer.fill(self.read_value);
        self.transfers.push(Transfer::Read(buffer.len()));
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, level: PinState, duration_ms: u32, _delay: &mut D) {
        self.resets.push((level, duration_ms));
    }

    fn busy_wait<D: DelayNs>(
        &mut self,
        busy_level: PinState,
        timeout_ms: u16,
        _delay: &mut D,
    ) -> Result<bool, Self::Error> {
        let index = self.busy_waits.len();
        self.busy_waits.push((busy_level, timeout_ms));
        Ok(self.timeout_at != Some(index))
    }
}

pub(crate) struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
