//! Windows registry-backed environment store

use std::io;

use winreg::enums::{
    HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE, REG_EXPAND_SZ, REG_SZ,
    RegType,
};
use winreg::{HKEY, RegKey, RegValue};

use super::EnvironmentStore;
use crate::core::Scope;

const USER_ENV_KEY: &str = "Environment";
const SYSTEM_ENV_KEY: &str = r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

/// Persistent variables as Windows stores them (what `setx` and the
/// System Properties dialog edit).
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStore;

fn location(scope: Scope) -> (HKEY, &'static str) {
    match scope {
        Scope::Machine => (HKEY_LOCAL_MACHINE, SYSTEM_ENV_KEY),
        Scope::User => (HKEY_CURRENT_USER, USER_ENV_KEY),
    }
}

fn decode_utf16_reg(bytes: &[u8]) -> String {
    if bytes.len() < 2 {
        return String::new();
    }

    let mut utf16: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    while utf16.last() == Some(&0) {
        utf16.pop();
    }

    String::from_utf16_lossy(&utf16)
}

fn encode_utf16_reg(value: &str) -> Vec<u8> {
    value
        .encode_utf16()
        .chain(Some(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

fn read_raw(scope: Scope, name: &str) -> io::Result<Option<(String, RegType)>> {
    let (root, subkey) = location(scope);
    let key = RegKey::predef(root).open_subkey_with_flags(subkey, KEY_READ)?;
    match key.get_raw_value(name) {
        Ok(raw) => Ok(Some((decode_utf16_reg(&raw.bytes), raw.vtype))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl EnvironmentStore for RegistryStore {
    fn get(&self, variable: &str, scope: Scope) -> io::Result<Option<String>> {
        Ok(read_raw(scope, variable)?.map(|(value, _)| value))
    }

    fn set(&self, variable: &str, value: &str, scope: Scope) -> io::Result<()> {
        // PATH is usually REG_EXPAND_SZ (%SystemRoot%...); keep whatever type is there
        let vtype = match read_raw(scope, variable)? {
            Some((_, vtype @ (REG_SZ | REG_EXPAND_SZ))) => vtype,
            _ if value.contains('%') => REG_EXPAND_SZ,
            _ => REG_SZ,
        };

        let (root, subkey) = location(scope);
        let key = RegKey::predef(root).open_subkey_with_flags(subkey, KEY_SET_VALUE)?;
        let raw = RegValue {
            bytes: encode_utf16_reg(value).into(),
            vtype,
        };
        key.set_raw_value(variable, &raw)
    }
}
