//! Typed CIDR prefixes backed by fixed-width integers.
//!
//! A [`Cidr`] stores its network address as a plain `u32` or `u128` so that
//! masking, sibling detection and ordering are single integer operations.
//! [`Prefix`] wraps the two families and is what the rest of the crate works
//! with.

use ipnet::{IpNet, Ipv4Net, Ipv6Net, PrefixLenError};
use std::fmt;
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::AggregateError;

/// Integer representation of an address of one family.
pub trait AddressBits: Copy + Eq + Ord + Hash + fmt::Debug {
    /// Number of bits in an address of this family.
    const WIDTH: u8;

    /// Standard library address type, used for display.
    type Addr: fmt::Display;

    /// Netmask with the `len` leading bits set. `len` must not exceed `WIDTH`.
    fn netmask(len: u8) -> Self;

    /// The single bit that tells the two halves of a length-`len` prefix's
    /// parent apart. Zero when `len` is 0.
    fn half_bit(len: u8) -> Self;

    fn and(self, other: Self) -> Self;

    fn xor(self, other: Self) -> Self;

    fn to_addr(self) -> Self::Addr;
}

macro_rules! impl_address_bits {
    ($ty:ty, $addr:ty) => {
        impl AddressBits for $ty {
            const WIDTH: u8 = <$ty>::BITS as u8;
            type Addr = $addr;

            fn netmask(len: u8) -> Self {
                // A shift by the full width (len == 0) overflows
                <$ty>::MAX
                    .checked_shl(u32::from(Self::WIDTH - len))
                    .unwrap_or(0)
            }

            fn half_bit(len: u8) -> Self {
                (1 as $ty)
                    .checked_shl(u32::from(Self::WIDTH - len))
                    .unwrap_or(0)
            }

            fn and(self, other: Self) -> Self {
                self & other
            }

            fn xor(self, other: Self) -> Self {
                self ^ other
            }

            fn to_addr(self) -> Self::Addr {
                <$addr>::from(self)
            }
        }
    };
}

impl_address_bits!(u32, Ipv4Addr);
impl_address_bits!(u128, Ipv6Addr);

/// Address family of a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Ipv4,
    Ipv6,
}

impl Family {
    /// Address width in bits.
    pub fn width(self) -> u8 {
        match self {
            Family::Ipv4 => u32::WIDTH,
            Family::Ipv6 => u128::WIDTH,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Ipv4 => f.write_str("IPv4"),
            Family::Ipv6 => f.write_str("IPv6"),
        }
    }
}

/// A canonical network prefix of one address family.
///
/// All bits past `len` are zero. Ordering is by address, then length, which
/// places a covering prefix before everything it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cidr<A> {
    addr: A,
    len: u8,
}

impl<A: AddressBits> Cidr<A> {
    /// Build a prefix, masking off host bits.
    ///
    /// Returns `None` if `len` is longer than the address width.
    pub fn new(addr: A, len: u8) -> Option<Self> {
        if len > A::WIDTH {
            return None;
        }
        Some(Self {
            addr: addr.and(A::netmask(len)),
            len,
        })
    }

    pub fn addr(&self) -> A {
        self.addr
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    /// Check if `other` lies entirely inside this prefix.
    pub fn contains(&self, other: &Self) -> bool {
        self.len <= other.len && other.addr.and(A::netmask(self.len)) == self.addr
    }

    /// The prefix one bit shorter that covers this one.
    pub fn parent(&self) -> Option<Self> {
        let len = self.len.checked_sub(1)?;
        Some(Self {
            addr: self.addr.and(A::netmask(len)),
            len,
        })
    }

    /// The other half of this prefix's parent.
    pub fn sibling(&self) -> Option<Self> {
        if self.len == 0 {
            return None;
        }
        Some(Self {
            addr: self.addr.xor(A::half_bit(self.len)),
            len: self.len,
        })
    }

    /// Number of addresses covered, saturating at `u128::MAX` for `::/0`.
    pub fn address_count(&self) -> u128 {
        1u128
            .checked_shl(u32::from(A::WIDTH - self.len))
            .unwrap_or(u128::MAX)
    }
}

impl<A: AddressBits> fmt::Display for Cidr<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr.to_addr(), self.len)
    }
}

/// An IPv4 or IPv6 prefix.
///
/// The derived ordering sorts every IPv4 prefix before every IPv6 prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prefix {
    V4(Cidr<u32>),
    V6(Cidr<u128>),
}

impl Prefix {
    pub fn family(&self) -> Family {
        match self {
            Prefix::V4(_) => Family::Ipv4,
            Prefix::V6(_) => Family::Ipv6,
        }
    }

    pub fn len(&self) -> u8 {
        match self {
            Prefix::V4(c) => c.len(),
            Prefix::V6(c) => c.len(),
        }
    }

    /// Check if `other` lies entirely inside this prefix. Always false
    /// across families.
    pub fn contains(&self, other: &Prefix) -> bool {
        match (self, other) {
            (Prefix::V4(a), Prefix::V4(b)) => a.contains(b),
            (Prefix::V6(a), Prefix::V6(b)) => a.contains(b),
            _ => false,
        }
    }

    pub fn address_count(&self) -> u128 {
        match self {
            Prefix::V4(c) => c.address_count(),
            Prefix::V6(c) => c.address_count(),
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prefix::V4(c) => fmt::Display::fmt(c, f),
            Prefix::V6(c) => fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for Prefix {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_prefix(s)
    }
}

impl From<IpNet> for Prefix {
    fn from(net: IpNet) -> Self {
        match net {
            IpNet::V4(n) => Prefix::V4(Cidr {
                addr: u32::from(n.network()),
                len: n.prefix_len(),
            }),
            IpNet::V6(n) => Prefix::V6(Cidr {
                addr: u128::from(n.network()),
                len: n.prefix_len(),
            }),
        }
    }
}

impl TryFrom<Prefix> for IpNet {
    type Error = PrefixLenError;

    fn try_from(prefix: Prefix) -> Result<Self, Self::Error> {
        match prefix {
            Prefix::V4(c) => Ipv4Net::new(c.addr.to_addr(), c.len).map(IpNet::V4),
            Prefix::V6(c) => Ipv6Net::new(c.addr.to_addr(), c.len).map(IpNet::V6),
        }
    }
}
