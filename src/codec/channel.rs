// ME line encoding: the sixteen numeric fields of a memory channel
//
// ME ccc,rrrrrrrrrr,s,d,r,t,c,d,tt,cc,ddd,oooooooo,m,xxxxxxxxxx,s,l

use super::{strip_terminator, CodecError, Result};
use crate::core::constants::{CHANNEL_FIELDS, EMPTY_MARKER, ME_COMMAND, MIN_CHANNEL_FIELDS};
use crate::core::MemoryEntry;
use std::num::TryFromIntError;

/// One positional field of the ME line
struct Field {
    name: &'static str,
    /// Zero-padded width in digits
    width: usize,
    get: fn(&MemoryEntry) -> u64,
    set: fn(&mut MemoryEntry, u64) -> std::result::Result<(), TryFromIntError>,
}

/// Wire order of the ME fields. Do not reorder.
const FIELDS: [Field; CHANNEL_FIELDS] = [
    Field {
        name: "number",
        width: 3,
        get: |m| m.number.into(),
        set: |m, v| {
            m.number = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "rx_frequency",
        width: 10,
        get: |m| m.rx_frequency.into(),
        set: |m, v| {
            m.rx_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "rx_step_size",
        width: 1,
        get: |m| m.rx_step_size.into(),
        set: |m, v| {
            m.rx_step_size = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "shift_direction",
        width: 1,
        get: |m| m.shift_direction.into(),
        set: |m, v| {
            m.shift_direction = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "reverse_enabled",
        width: 1,
        get: |m| m.reverse_enabled.into(),
        set: |m, v| {
            m.reverse_enabled = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "tone_enabled",
        width: 1,
        get: |m| m.tone_enabled.into(),
        set: |m, v| {
            m.tone_enabled = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "ctcss_enabled",
        width: 1,
        get: |m| m.ctcss_enabled.into(),
        set: |m, v| {
            m.ctcss_enabled = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "dcs_enabled",
        width: 1,
        get: |m| m.dcs_enabled.into(),
        set: |m, v| {
            m.dcs_enabled = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "tone_frequency",
        width: 2,
        get: |m| m.tone_frequency.into(),
        set: |m, v| {
            m.tone_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "ctcss_frequency",
        width: 2,
        get: |m| m.ctcss_frequency.into(),
        set: |m, v| {
            m.ctcss_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "dcs_frequency",
        width: 3,
        get: |m| m.dcs_frequency.into(),
        set: |m, v| {
            m.dcs_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "offset_frequency",
        width: 8,
        get: |m| m.offset_frequency.into(),
        set: |m, v| {
            m.offset_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "mode",
        width: 1,
        get: |m| m.mode.into(),
        set: |m, v| {
            m.mode = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "tx_frequency",
        width: 10,
        get: |m| m.tx_frequency.into(),
        set: |m, v| {
            m.tx_frequency = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "tx_step_size",
        width: 1,
        get: |m| m.tx_step_size.into(),
        set: |m, v| {
            m.tx_step_size = v.try_into()?;
            Ok(())
        },
    },
    Field {
        name: "lock_out",
        width: 1,
        get: |m| m.lock_out.into(),
        set: |m, v| {
            m.lock_out = v.try_into()?;
            Ok(())
        },
    },
];

/// Check that every numeric field of `entry` fits its wire width.
///
/// The radio only takes zero-padded fixed-width digits; a value with more
/// digits than its field would produce a line the radio cannot parse.
pub fn check_channel_fields(entry: &MemoryEntry) -> Result<()> {
    for field in FIELDS.iter() {
        let value = (field.get)(entry);
        if value >= 10u64.pow(field.width as u32) {
            return Err(CodecError::new(
                ME_COMMAND,
                &encode_channel_line(entry),
                format!("{} {} does not fit in {} digits", field.name, value, field.width),
            ));
        }
    }
    Ok(())
}

/// Format the numeric fields of `entry` as an ME write line (no terminator).
///
/// Fields are not range checked here; run [`check_channel_fields`] first
/// when the entry comes from outside the radio.
pub fn encode_channel_line(entry: &MemoryEntry) -> String {
    let fields: Vec<String> = FIELDS
        .iter()
        .map(|field| format!("{:0width$}", (field.get)(entry), width = field.width))
        .collect();
    format!("{} {}", ME_COMMAND, fields.join(","))
}

/// Parse an ME response into the numeric fields of a new entry.
///
/// The empty marker `N` decodes to an all-zero entry. The name is always
/// left empty; it comes from the MN line.
///
/// The radio has been seen to omit the trailing lock-out field, so a line
/// with 15 fields is accepted and lock-out reads as 0.
pub fn decode_channel_line(line: &str) -> Result<MemoryEntry> {
    let body = strip_terminator(line);
    let mut entry = MemoryEntry::default();

    if body == EMPTY_MARKER {
        return Ok(entry);
    }

    let params = body
        .strip_prefix(ME_COMMAND)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or_else(|| CodecError::new(ME_COMMAND, body, "missing \"ME \" prefix"))?;

    let values: Vec<&str> = params.split(',').collect();
    if values.len() < MIN_CHANNEL_FIELDS || values.len() > CHANNEL_FIELDS {
        return Err(CodecError::new(
            ME_COMMAND,
            body,
            format!("expected {} fields, got {}", CHANNEL_FIELDS, values.len()),
        ));
    }

    for (field, value) in FIELDS.iter().zip(values) {
        if value.is_empty()
            || value.len() > field.width
            || !value.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(CodecError::new(
                ME_COMMAND,
                body,
                format!("{} is not a {}-digit number: {:?}", field.name, field.width, value),
            ));
        }

        // At most 10 ASCII digits, always fits in u64
        let number: u64 = value.parse().map_err(|_| {
            CodecError::new(ME_COMMAND, body, format!("{} is not a number", field.name))
        })?;

        (field.set)(&mut entry, number).map_err(|_| {
            CodecError::new(ME_COMMAND, body, format!("{} out of range: {}", field.name, number))
        })?;
    }

    Ok(entry)
}
