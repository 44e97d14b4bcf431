use std::io;
use std::os::fd::{AsRawFd, OwnedFd};

use crate::error::{DeauthError, Result};

#[cfg(target_os = "linux")]
pub use linux_impl::open_socket_tx;

#[cfg(not(target_os = "linux"))]
pub use unsupported_impl::open_socket_tx;

/// Longest interface name the kernel accepts, without the trailing NUL.
pub const IFNAME_MAX: usize = 15;

/// Anything a finished frame can be written to.
pub trait RawChannel {
    fn send(&mut self, frame: &[u8]) -> io::Result<()>;
}

impl<C: RawChannel + ?Sized> RawChannel for &mut C {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).send(frame)
    }
}

/// Blocking link-layer socket bound to one interface.
#[derive(Debug)]
pub struct RawSocket {
    fd: OwnedFd,
    ifindex: i32,
}

impl RawSocket {
    pub fn open(interface_name: &str) -> Result<Self> {
        validate_interface_name(interface_name)?;
        let ifindex = interface_index(interface_name)?;
        let fd = open_socket_tx(ifindex)?;
        Ok(RawSocket { fd, ifindex })
    }

    pub fn ifindex(&self) -> i32 {
        self.ifindex
    }

    pub fn raw_fd(&self) -> i32 {
        self.fd.as_raw_fd()
    }
}

impl RawChannel for RawSocket {
    fn send(&mut self, frame: &[u8]) -> io::Result<()> {
        let sent = nix::sys::socket::send(
            self.fd.as_raw_fd(),
            frame,
            nix::sys::socket::MsgFlags::empty(),
        )
        .map_err(io::Error::from)?;

        if sent != frame.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", sent, frame.len()),
            ));
        }
        Ok(())
    }
}

pub fn validate_interface_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name.len() > IFNAME_MAX
        || name
            .chars()
            .any(|c| c == '/' || c == '\0' || c.is_whitespace());
    if bad {
        return Err(DeauthError::InvalidInterface(name.to_string()));
    }
    Ok(())
}

fn interface_index(name: &str) -> Result<i32> {
    let idx = nix::net::if_::if_nametoindex(name)
        .map_err(|e| DeauthError::ChannelError(format!("Unknown interface {}: {}", name, e)))?;
    i32::try_from(idx)
        .map_err(|_| DeauthError::ChannelError(format!("Interface index out of range: {}", idx)))
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use std::{
        io, mem,
        os::fd::{AsRawFd, OwnedFd},
    };

    use libc::{sockaddr_ll, ETH_ALEN, ETH_P_ALL, SOL_SOCKET, SO_PRIORITY};
    use nix::sys::socket::{socket, AddressFamily, SockFlag, SockProtocol, SockType};

    use crate::error::{DeauthError, Result};

    pub fn open_socket_tx(ifindex: i32) -> Result<OwnedFd> {
        let mut saddr: sockaddr_ll = unsafe { mem::zeroed() };
        let prioval: i32 = 20;

        let fd_socket_tx = socket(
            AddressFamily::Packet,
            SockType::Raw,
            SockFlag::SOCK_CLOEXEC,
            SockProtocol::EthAll,
        )
        .map_err(|e| DeauthError::ChannelError(format!("Socket creation failed: {}", e)))?;

        // Best effort, the kernel default priority still transmits.
        unsafe {
            libc::setsockopt(
                fd_socket_tx.as_raw_fd(),
                SOL_SOCKET,
                SO_PRIORITY,
                &prioval as *const _ as *const libc::c_void,
                mem::size_of::<i32>() as libc::socklen_t,
            )
        };

        saddr.sll_family = libc::AF_PACKET as u16;
        saddr.sll_protocol = (ETH_P_ALL as u16).to_be();
        saddr.sll_ifindex = ifindex;
        saddr.sll_halen = ETH_ALEN as u8;

        let bind_ret = unsafe {
            libc::bind(
                fd_socket_tx.as_raw_fd(),
                (&saddr as *const libc::sockaddr_ll).cast(),
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };

        if bind_ret < 0 {
            let error = io::Error::last_os_error();
            return Err(DeauthError::ChannelError(format!("Bind failed: {}", error)));
        }

        Ok(fd_socket_tx)
    }
}

#[cfg(not(target_os = "linux"))]
mod unsupported_impl {
    use std::os::fd::OwnedFd;

    use crate::error::{DeauthError, Result};

    pub fn open_socket_tx(_ifindex: i32) -> Result<OwnedFd> {
        Err(DeauthError::ChannelError(
            "Raw AF_PACKET sockets are only available on Linux".to_string(),
        ))
    }
}
