//! Numeric replies the bot core reacts to.
#![allow(non_camel_case_types)]

use std::str::FromStr;

/// Server numeric replies, by code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Registration complete
    RPL_WELCOME = 1,
    /// 005 - Feature advertisement
    RPL_ISUPPORT = 5,
    /// 315 - End of WHO list
    RPL_ENDOFWHO = 315,
    /// 352 - Legacy WHO reply
    RPL_WHOREPLY = 352,
    /// 353 - NAMES reply
    RPL_NAMREPLY = 353,
    /// 354 - Extended (WHOX) WHO reply
    RPL_WHOSPCRPL = 354,
    /// 366 - End of NAMES list
    RPL_ENDOFNAMES = 366,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 422 - MOTD missing
    ERR_NOMOTD = 422,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname in use
    ERR_NICKNAMEINUSE = 433,
}

impl Response {
    /// Numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Three-digit command string as it appears on the wire.
    pub fn as_command(&self) -> String {
        format!("{:03}", self.code())
    }

    /// Look up a response by numeric code.
    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::RPL_WELCOME,
            5 => Self::RPL_ISUPPORT,
            315 => Self::RPL_ENDOFWHO,
            352 => Self::RPL_WHOREPLY,
            353 => Self::RPL_NAMREPLY,
            354 => Self::RPL_WHOSPCRPL,
            366 => Self::RPL_ENDOFNAMES,
            376 => Self::RPL_ENDOFMOTD,
            422 => Self::ERR_NOMOTD,
            432 => Self::ERR_ERRONEUSNICKNAME,
            433 => Self::ERR_NICKNAMEINUSE,
            _ => return None,
        })
    }

    /// True for error numerics (400-599).
    pub fn is_error(&self) -> bool {
        (400..600).contains(&self.code())
    }
}

impl FromStr for Response {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 3 {
            return Err(());
        }
        s.parse::<u16>()
            .ok()
            .and_then(Self::from_code)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Response::RPL_WELCOME.as_command(), "001");
        assert_eq!(Response::RPL_WHOSPCRPL.as_command(), "354");
        assert_eq!("433".parse::<Response>(), Ok(Response::ERR_NICKNAMEINUSE));
        assert!("33".parse::<Response>().is_err());
        assert!("999".parse::<Response>().is_err());
    }

    #[test]
    fn test_is_error() {
        assert!(Response::ERR_NICKNAMEINUSE.is_error());
        assert!(!Response::RPL_WHOREPLY.is_error());
    }
}
