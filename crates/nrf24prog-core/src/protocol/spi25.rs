//! SPI25 style command sequences
//!
//! The nRF24 flash interface borrows its register and read opcodes from the
//! JEDEC SPI25 command set, so the chip drivers share these helpers with
//! ordinary SPI flash.
//!
//! Uses `maybe_async` to support both sync and async modes:
//! - With `is_sync` feature: blocking/synchronous
//! - Without `is_sync` feature: async (for WASM, Embassy, tokio)

use crate::error::{Error, Result};
use crate::programmer::SpiMaster;
use crate::spi::{opcodes, AddressWidth, SpiCommand};
use maybe_async::maybe_async;

/// Read the status register 1
#[maybe_async]
pub async fn read_status1<M: SpiMaster + ?Sized>(master: &mut M) -> Result<u8> {
    let mut buf = [0u8; 1];
    let mut cmd = SpiCommand::read_reg(opcodes::RDSR, &mut buf);
    master.execute(&mut cmd).await?;
    Ok(buf[0])
}

/// Send the Write Enable command
#[maybe_async]
pub async fn write_enable<M: SpiMaster + ?Sized>(master: &mut M) -> Result<()> {
    let mut cmd = SpiCommand::simple(opcodes::WREN);
    master.execute(&mut cmd).await
}

/// Wait for the WIP (Write In Progress) bit to clear
///
/// Polls the status register until the Write In Progress bit clears.
///
/// # Arguments
/// * `poll_delay_us` - Delay in microseconds between status register polls
/// * `timeout_us` - Maximum time to wait before returning Error::Timeout
#[maybe_async]
pub async fn wait_ready<M: SpiMaster + ?Sized>(
    master: &mut M,
    poll_delay_us: u32,
    timeout_us: u32,
) -> Result<()> {
    let max_polls = if poll_delay_us > 0 {
        timeout_us / poll_delay_us
    } else {
        timeout_us // Fall back to polling once per microsecond
    };

    for _ in 0..max_polls {
        let status = read_status1(master).await?;
        if status & opcodes::SR1_WIP == 0 {
            return Ok(());
        }
        if poll_delay_us > 0 {
            master.delay_us(poll_delay_us).await;
        }
    }

    Err(Error::Timeout)
}

/// Write the status register 1
///
/// Automatically sends WREN before writing.
#[maybe_async]
pub async fn write_status1<M: SpiMaster + ?Sized>(master: &mut M, value: u8) -> Result<()> {
    write_enable(master).await?;
    let data = [value];
    let mut cmd = SpiCommand::write_reg(opcodes::WRSR, &data);
    master.execute(&mut cmd).await?;
    // Status register write typically takes 5-200ms, poll every 10ms
    wait_ready(master, 10_000, 500_000).await
}

/// Read `buf.len()` bytes starting at `addr` with the given address width
///
/// Splits the read into chunks of at most `max_read_len()` bytes.
#[maybe_async]
pub async fn read_bytes<M: SpiMaster + ?Sized>(
    master: &mut M,
    width: AddressWidth,
    addr: u32,
    buf: &mut [u8],
) -> Result<()> {
    let end = addr as u64 + buf.len() as u64;
    if end > width.max_size() as u64 {
        return Err(Error::AddressTooWide);
    }

    let max_len = master.max_read_len();
    let mut offset = 0;

    while offset < buf.len() {
        let chunk_len = core::cmp::min(max_len, buf.len() - offset);
        let chunk = &mut buf[offset..offset + chunk_len];
        let mut cmd = match width {
            AddressWidth::TwoByte => SpiCommand::read_2b(opcodes::READ, addr + offset as u32, chunk),
            _ => SpiCommand::read_3b(opcodes::READ, addr + offset as u32, chunk),
        };
        master.execute(&mut cmd).await?;
        offset += chunk_len;
    }

    Ok(())
}

/// Read data using 2-byte addressing (nRF24 flash interface)
#[maybe_async]
pub async fn read_2b<M: SpiMaster + ?Sized>(
    master: &mut M,
    addr: u32,
    buf: &mut [u8],
) -> Result<()> {
    read_bytes(master, AddressWidth::TwoByte, addr, buf).await
}

/// Read data using 3-byte addressing
#[maybe_async]
pub async fn read_3b<M: SpiMaster + ?Sized>(
    master: &mut M,
    addr: u32,
    buf: &mut [u8],
) -> Result<()> {
    read_bytes(master, AddressWidth::ThreeByte, addr, buf).await
}

