use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use znbt_error::{ParserError, ZnbtResult};

use crate::{CompoundTag, Registry, Tag, TagDeserializer, TagSerializer};

/// `SocketAddr` ↔ `{hostname: String, port: Int}`.
///
/// При чтении `hostname` сначала разбирается как IP-адрес; иначе имя
/// разрешается через системный резолвер и берётся первый адрес.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketAddrAdapter;

impl TagSerializer<SocketAddr> for SocketAddrAdapter {
    fn serialize(
        &self,
        value: &SocketAddr,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        let mut compound = CompoundTag::with_capacity(2);
        compound.put("hostname", value.ip().to_string());
        compound.put("port", i32::from(value.port()));
        Ok(compound.into())
    }
}

impl TagDeserializer<SocketAddr> for SocketAddrAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<SocketAddr> {
        let compound = tag.as_compound()?;
        let hostname = compound.require("hostname")?.as_str()?;
        let port = compound.require("port")?.as_i32()?;
        let port =
            u16::try_from(port).map_err(|_| invalid(format!("port {port} out of range")))?;

        if let Ok(ip) = hostname.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }

        (hostname, port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| invalid(format!("cannot resolve host '{hostname}'")).into())
    }
}

fn invalid(reason: String) -> ParserError {
    ParserError::InvalidValue {
        type_name: "SocketAddr".into(),
        reason,
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
