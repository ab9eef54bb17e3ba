// Simulated T6963 behind the `Bus` trait.
//
// Decodes /CE falling edges the way the controller does: a write strobe
// latches the port as a parameter (C/D low) or executes a command (C/D high)
// with the parameters stacked so far. A read with C/D high returns status,
// with C/D low the byte fetched by the last read command.

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::PinState;

use t6963::{Bus, Direction, Geometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

pub struct Sim {
    pub memory: Vec<u8>,
    pub pointer: u16,
    pub cursor: (u8, u8),
    pub offset: u8,
    pub text_home: u16,
    pub text_area: u8,
    pub graphic_home: u16,
    pub graphic_area: u8,
    pub mode: u8,
    pub display_mode: u8,
    pub cursor_pattern: u8,

    /// Every executed command with its parameters.
    pub commands: Vec<(u8, Vec<u8>)>,
    pub status_reads: usize,
    pub resets: usize,

    /// Status reads that report busy before the device becomes ready.
    pub busy_reads: usize,
    /// Never report ready.
    pub stuck: bool,
    /// Fail every data port write.
    pub fail_writes: bool,

    pub rst: bool,
    pub ce: bool,
    pub cd: bool,
    pub wr: bool,
    pub direction: Direction,
    pub port: u8,

    args: Vec<u8>,
    read_latch: u8,
}

impl Sim {
    pub fn new() -> Self {
        Self {
            memory: vec![0; 0x1_0000],
            pointer: 0,
            cursor: (0, 0),
            offset: 0,
            text_home: 0,
            text_area: 0,
            graphic_home: 0,
            graphic_area: 0,
            mode: 0,
            display_mode: 0,
            cursor_pattern: 0,
            commands: Vec::new(),
            status_reads: 0,
            resets: 0,
            busy_reads: 0,
            stuck: false,
            fail_writes: false,
            rst: true,
            ce: true,
            cd: false,
            wr: false,
            direction: Direction::Output,
            port: 0,
            args: Vec::new(),
            read_latch: 0,
        }
    }

    pub fn opcodes(&self) -> Vec<u8> {
        self.commands.iter().map(|(cmd, _)| *cmd).collect()
    }

    pub fn forget_history(&mut self) {
        self.commands.clear();
        self.status_reads = 0;
    }

    pub fn pixel(&self, g: &Geometry, x: u16, y: u16) -> bool {
        let byte = self.memory[g.graphic_address(x, y) as usize];
        byte & g.pixel_mask(x) != 0
    }

    pub fn lit_pixels(&self, g: &Geometry) -> Vec<(u16, u16)> {
        let mut lit = Vec::new();
        for y in 0..g.lines() {
            for x in 0..g.pixels_per_line() {
                if self.pixel(g, x, y) {
                    lit.push((x, y));
                }
            }
        }
        lit
    }

    pub fn range(&self, start: u16, len: u16) -> &[u8] {
        &self.memory[start as usize..start as usize + len as usize]
    }

    fn status(&mut self) -> u8 {
        self.status_reads += 1;
        if self.stuck {
            return 0x00;
        }
        if self.busy_reads > 0 {
            self.busy_reads -= 1;
            return 0x01;
        }
        0x03
    }

    fn strobe(&mut self) {
        if !self.wr {
            return;
        }
        if self.cd {
            let args = std::mem::take(&mut self.args);
            self.execute(self.port, &args);
            self.commands.push((self.port, args));
        } else {
            self.args.push(self.port);
        }
    }

    fn word(args: &[u8]) -> u16 {
        u16::from_le_bytes([args.first().copied().unwrap_or(0), args.get(1).copied().unwrap_or(0)])
    }

    fn execute(&mut self, cmd: u8, args: &[u8]) {
        let at = self.pointer as usize;
        match cmd {
            0x21 => self.cursor = (args[0], args[1]),
            0x22 => self.offset = args[0] & 0x1F,
            0x24 => self.pointer = Self::word(args),
            0x40 => self.text_home = Self::word(args),
            0x41 => self.text_area = args[0],
            0x42 => self.graphic_home = Self::word(args),
            0x43 => self.graphic_area = args[0],
            0x80..=0x8F => self.mode = cmd,
            0x90..=0x9F => self.display_mode = cmd,
            0xA0..=0xA7 => self.cursor_pattern = cmd,
            0xC0 => {
                self.memory[at] = args[0];
                self.pointer = self.pointer.wrapping_add(1);
            }
            0xC5 => self.read_latch = self.memory[at],
            other => panic!("unexpected command {other:#04x}"),
        }
    }
}

impl Bus for Sim {
    type Error = SimFault;

    fn set_reset(&mut self, level: PinState) -> Result<(), SimFault> {
        let high = level == PinState::High;
        if high && !self.rst {
            self.resets += 1;
            self.args.clear();
        }
        self.rst = high;
        Ok(())
    }

    fn set_chip_enable(&mut self, level: PinState) -> Result<(), SimFault> {
        let high = level == PinState::High;
        if !high && self.ce && self.rst {
            self.strobe();
        }
        self.ce = high;
        Ok(())
    }

    fn set_command_data(&mut self, level: PinState) -> Result<(), SimFault> {
        self.cd = level == PinState::High;
        Ok(())
    }

    fn set_write_strobe(&mut self, level: PinState) -> Result<(), SimFault> {
        self.wr = level == PinState::High;
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> Result<(), SimFault> {
        self.direction = direction;
        Ok(())
    }

    fn write_data(&mut self, value: u8) -> Result<(), SimFault> {
        if self.fail_writes {
            return Err(SimFault);
        }
        self.port = value;
        Ok(())
    }

    fn read_data(&mut self) -> Result<u8, SimFault> {
        if self.ce || self.wr || self.direction != Direction::Input {
            return Ok(0xFF);
        }
        if self.cd {
            Ok(self.status())
        } else {
            Ok(self.read_latch)
        }
    }
}

pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
