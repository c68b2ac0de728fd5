use crate::error::Error;
use crate::simulation::*;
use crate::Settings;
use json::{self, JsonValue};
use std::{fs::File, io::Read, path::Path};

macro_rules! get_json {
    ($json:ident,$($key:literal),+, $func:ident) => {
            get_json!($json$([$key])+, concat!($("/",$key),+), $func)
    };

    ($value:expr, $key:expr, $func:ident) => {
        $value
            .$func()
            .ok_or(Error::MissingKey($key))?
    };
}

macro_rules! opt_json {
    ($json:ident,$($key:literal),+, $func:ident) => {
            {
                let value = &$json$([$key])+;
                if value.is_null() {
                    None
                } else {
                    Some(value.$func().ok_or(Error::InvalidValue {
                        key: concat!($("/",$key),+),
                        reason: format!("unexpected value {value}"),
                    })?)
                }
            }
    };
}

macro_rules! json_value_or_err {
    ($json:ident,$($key:literal),+) => {
            {
                let value = &$json$([$key])+;
                if value.is_null() {
                    Err(Error::MissingKey(concat!($("/",$key),+)))
                } else {
                    Ok(value)
                }
            }
    };
}

pub fn parse_settings<P: AsRef<Path>>(settings_file_path: P) -> Result<Settings, Error> {
    parse_settings_json(&read_json(settings_file_path)?)
}

pub fn parse_level<P: AsRef<Path>>(level_file_path: P) -> Result<Level, Error> {
    parse_level_json(&read_json(level_file_path)?)
}

pub fn parse_settings_from_string(settings: &str) -> Result<Settings, Error> {
    parse_settings_json(&json::parse(settings)?)
}

pub fn parse_level_from_string(level: &str) -> Result<Level, Error> {
    parse_level_json(&json::parse(level)?)
}

fn read_json<P: AsRef<Path>>(file_path: P) -> Result<JsonValue, Error> {
    let path = file_path.as_ref();
    let io_error = |source| Error::Io {
        path: path.display().to_string(),
        source,
    };

    let mut file_content = String::new();
    File::open(path)
        .map_err(io_error)?
        .read_to_string(&mut file_content)
        .map_err(io_error)?;
    Ok(json::parse(&file_content)?)
}

fn parse_settings_json(settings_json: &JsonValue) -> Result<Settings, Error> {
    let defaults = Settings::default();
    let control_scheme = match opt_json!(settings_json, "ControlScheme", as_str) {
        Some(name) => ControlScheme::from_str(name).ok_or(Error::InvalidValue {
            key: "/ControlScheme",
            reason: format!("unknown control scheme {name}"),
        })?,
        None => defaults.control_scheme,
    };

    let settings = Settings {
        gravity: opt_json!(settings_json, "Gravity", as_f64).unwrap_or(defaults.gravity),
        thrust: opt_json!(settings_json, "Thrust", as_f64).unwrap_or(defaults.thrust),
        tick_rate: opt_json!(settings_json, "TickRate", as_f64).unwrap_or(defaults.tick_rate),
        max_horizontal_speed: opt_json!(settings_json, "MaxHorizontalSpeed", as_f64)
            .unwrap_or(defaults.max_horizontal_speed),
        control_scheme,
    };
    settings.validate()?;
    Ok(settings)
}

fn parse_level_json(level_json: &JsonValue) -> Result<Level, Error> {
    let arena = Arena::new(
        get_json!(level_json, "Arena", "Width", as_f64),
        get_json!(level_json, "Arena", "Height", as_f64),
    );
    let pad = Pad::new(
        get_json!(level_json, "Pad", "X", as_f64),
        get_json!(level_json, "Pad", "Y", as_f64),
        get_json!(level_json, "Pad", "LeftShoulder", as_f64),
        get_json!(level_json, "Pad", "RightShoulder", as_f64),
    );
    Ok(Level::new(arena, pad, parse_ship(level_json)?))
}

fn parse_ship(json: &JsonValue) -> Result<ShipState, Error> {
    Ok(ShipState {
        x: get_json!(json, "Ship", "X", as_f64),
        y: get_json!(json, "Ship", "Y", as_f64),
        v1: get_json!(json, "Ship", "VSpeed", as_f64),
        v2: get_json!(json, "Ship", "HSpeed", as_f64),
        fuel: parse_fuel(json_value_or_err!(json, "Ship", "Fuel")?)?,
    })
}

fn parse_fuel(fuel_json: &JsonValue) -> Result<Fuel, Error> {
    if let Some(units) = fuel_json.as_u32() {
        Ok(Fuel::Limited(units))
    } else if fuel_json.as_str() == Some("Unlimited") {
        Ok(Fuel::Unlimited)
    } else {
        Err(Error::InvalidValue {
            key: "/Ship/Fuel",
            reason: format!("expected a unit count or \"Unlimited\", got {fuel_json}"),
        })
    }
}
