//! Mock I2C шины для тестов драйверов
//!
//! Эмулирует устройство с линейной картой регистров: запись первым байтом
//! выставляет указатель регистра, остальные байты пишутся начиная с него;
//! чтение идет от указателя с автоинкрементом.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use std::vec::Vec;

pub struct MockI2c {
    address: u8,
    pointer: usize,
    pub registers: [u8; 64],
    /// Все записи на шину: (адрес, данные)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Ошибка шины на следующей транзакции
    pub fail_next: bool,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            pointer: 0,
            registers: [0; 64],
            writes: Vec::new(),
            fail_next: false,
        }
    }

    pub fn set_registers(&mut self, start: u8, data: &[u8]) {
        let start = start as usize;
        self.registers[start..start + data.len()].copy_from_slice(data);
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(ErrorKind::Bus);
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(
                embedded_hal::i2c::NoAcknowledgeSource::Address,
            ));
        }

        for op in operations.iter_mut() {
            match op {
                Operation::Write(data) => {
                    self.writes.push((address, data.to_vec()));
                    if let Some((&reg, payload)) = data.split_first() {
                        self.pointer = reg as usize;
                        for &byte in payload {
                            self.registers[self.pointer] = byte;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.registers[self.pointer];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
