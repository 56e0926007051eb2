// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::core::error::ConfigError;
use crate::core::laser::{ColorMode, Laser, LaserView};
use crate::core::medium::Medium;
use crate::core::scene::{Prism, Scene};
use crate::core::shape::Shape;
use crate::core::tracer::Tracer;
use crate::math::bounds::Bounds2f;
use crate::math::constants::{Float, Vector2f};
use crate::math::transform::Transform2;
use crate::media::presets::{find_preset, AIR, CUSTOM_INDEX_RANGE};
use crate::sensors::intensity_meter::IntensityMeter;
use crate::shapes::circle::Circle;
use crate::shapes::polygon::Polygon;
use crate::shapes::prisms::PrismKind;
use crate::shapes::semicircle::SemiCircle;
use crate::tracers::refraction::RefractionTracer;

/// Half extent of the scene box used when a file has no `<bounds>`.
pub const DEFAULT_HALF_EXTENT: Float = 100.0;

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("{0}")]
    Parse(String),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid scene: {0}")]
    Config(#[from] ConfigError),
}

pub type SceneLoadResult<T> = Result<T, SceneLoadError>;

pub struct LoadedScene {
    pub scene: Scene,
    pub laser: Option<Laser>,
    pub probe: Option<IntensityMeter>,
    pub tracer: RefractionTracer,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneLoadResult<Scene> {
    let loaded = load_scene_with_settings(path)?;
    Ok(loaded.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> SceneLoadResult<LoadedScene> {
    let xml = fs::read_to_string(path.as_ref())?;
    log::info!("Loading scene from {}.", path.as_ref().display());
    parse_scene(&xml)
}

/// Parses a scene document.
///
/// ```xml
/// <scene>
///   <default name="n" value="1.5"/>
///   <bounds min="-50, -50" max="50, 50"/>
///   <environment medium="air"/>
///   <laser position="-30, 0" angle="0" wavelength="650" mode="white" view="ray"/>
///   <prism name="slab" index="$n">
///     <polygon reference="0">
///       <point value="0, -10"/> <point value="5, -10"/>
///       <point value="5, 10"/> <point value="0, 10"/>
///     </polygon>
///     <rotate angle="15"/>
///   </prism>
///   <probe position="20, 0" diameter="2"/>
///   <tracer max_depth="50" power_cutoff="0.001"/>
/// </scene>
/// ```
///
/// Angles are in degrees. `$name` tokens in attribute values are replaced
/// by earlier `<default>` entries.
pub fn parse_scene(xml: &str) -> SceneLoadResult<LoadedScene> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut builder = SceneBuilder::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => {
                let attrs = Attributes::parse(&e, &builder.defaults)?;
                builder.open(e.name().as_ref(), attrs)?;
            }
            Event::Empty(e) => {
                let attrs = Attributes::parse(&e, &builder.defaults)?;
                builder.open(e.name().as_ref(), attrs)?;
                builder.close(e.name().as_ref())?;
            }
            Event::End(e) => builder.close(e.name().as_ref())?,
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

struct Attributes(HashMap<String, String>);

impl Attributes {
    fn parse(e: &BytesStart, defaults: &HashMap<String, String>) -> SceneLoadResult<Self> {
        let mut values = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = resolve_value(&attr.unescape_value()?, defaults);
            values.insert(key, value);
        }
        Ok(Attributes(values))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|s| s.as_str())
    }

    fn float(&self, key: &str) -> SceneLoadResult<Option<Float>> {
        self.get(key).map(parse_float).transpose()
    }

    fn require_float(&self, key: &str, field: &'static str) -> SceneLoadResult<Float> {
        self.float(key)?.ok_or(SceneLoadError::MissingField(field))
    }

    fn vec2(&self, key: &str) -> SceneLoadResult<Option<Vector2f>> {
        self.get(key).map(parse_vec2).transpose()
    }

    fn require_vec2(&self, key: &str, field: &'static str) -> SceneLoadResult<Vector2f> {
        self.vec2(key)?.ok_or(SceneLoadError::MissingField(field))
    }

    fn bool(&self, key: &str) -> SceneLoadResult<Option<bool>> {
        self.get(key).map(parse_bool).transpose()
    }
}

enum Placement {
    Translate(Vector2f),
    Rotate(Float),
}

#[derive(Default)]
struct PrismBuilder {
    name: Option<String>,
    medium: Option<Medium>,
    shape: Option<Shape>,
    polygon: Option<(Vec<Vector2f>, usize)>,
    placement: Vec<Placement>,
}

impl PrismBuilder {
    fn set_shape(&mut self, shape: Shape) -> SceneLoadResult<()> {
        if self.shape.is_some() {
            return Err(SceneLoadError::Parse(String::from("prism has more than one shape")));
        }
        self.shape = Some(shape);
        Ok(())
    }

    fn build(self) -> SceneLoadResult<Prism> {
        let outline = self.shape.ok_or(SceneLoadError::MissingField("prism.shape"))?;
        // Rotations turn about the rotation center as placed so far.
        let mut placement = Transform2::default();
        for step in self.placement {
            let step = match step {
                Placement::Translate(d) => Transform2::translation(d.x, d.y),
                Placement::Rotate(angle) => {
                    let pivot = outline.transformed(&placement).rotation_center();
                    Transform2::rotation_about(angle, &pivot)
                }
            };
            placement = step.compose(&placement);
        }
        let shape = outline.transformed(&placement);
        let medium = self.medium.ok_or(SceneLoadError::MissingField("prism.medium"))?;
        let prism = Prism::new(shape, medium);
        Ok(match self.name {
            Some(name) => prism.with_name(&name),
            None => prism,
        })
    }
}

#[derive(Default)]
struct SceneBuilder {
    defaults: HashMap<String, String>,
    bounds: Option<Bounds2f>,
    environment: Option<Medium>,
    laser: Option<Laser>,
    probe: Option<IntensityMeter>,
    max_depth: Option<u32>,
    power_cutoff: Option<Float>,
    prisms: Vec<Prism>,
    current: Option<PrismBuilder>,
}

impl SceneBuilder {
    fn prism(&mut self, tag: &str) -> SceneLoadResult<&mut PrismBuilder> {
        self.current
            .as_mut()
            .ok_or_else(|| SceneLoadError::Parse(format!("<{}> outside of <prism>", tag)))
    }

    fn open(&mut self, name: &[u8], attrs: Attributes) -> SceneLoadResult<()> {
        match name {
            b"default" => {
                if let (Some(key), Some(value)) = (attrs.get("name"), attrs.get("value")) {
                    self.defaults.insert(key.to_string(), value.to_string());
                }
            }
            b"bounds" => {
                let min = attrs.require_vec2("min", "bounds.min")?;
                let max = attrs.require_vec2("max", "bounds.max")?;
                self.bounds = Some(Bounds2f::new(min, max));
            }
            b"environment" => {
                self.environment = Some(parse_medium(&attrs)?.ok_or(SceneLoadError::MissingField("environment.medium"))?);
            }
            b"laser" => self.laser = Some(parse_laser(&attrs)?),
            b"probe" => {
                let position = attrs.require_vec2("position", "probe.position")?;
                let diameter = attrs.require_float("diameter", "probe.diameter")?;
                self.probe = Some(IntensityMeter::new(position, diameter)?);
            }
            b"tracer" => {
                if let Some(depth) = attrs.get("max_depth") {
                    self.max_depth = Some(parse_u32(depth)?);
                }
                self.power_cutoff = attrs.float("power_cutoff")?;
            }
            b"prism" => {
                if self.current.is_some() {
                    return Err(SceneLoadError::Parse(String::from("nested <prism>")));
                }
                self.current = Some(PrismBuilder {
                    name: attrs.get("name").map(|s| s.to_string()),
                    medium: parse_medium(&attrs)?,
                    ..PrismBuilder::default()
                });
            }
            b"circle" => {
                let center = attrs.require_vec2("center", "circle.center")?;
                let radius = attrs.require_float("radius", "circle.radius")?;
                self.prism("circle")?.set_shape(Circle::new(center, radius)?.into())?;
            }
            b"semicircle" => {
                let center = attrs.require_vec2("center", "semicircle.center")?;
                let radius = attrs.require_float("radius", "semicircle.radius")?;
                let facing = attrs.float("facing")?.unwrap_or(90.0).to_radians();
                self.prism("semicircle")?.set_shape(SemiCircle::new(center, radius, facing)?.into())?;
            }
            b"preset" => {
                let kind = attrs.get("kind").ok_or(SceneLoadError::MissingField("preset.kind"))?;
                let kind = PrismKind::from_name(kind)
                    .ok_or_else(|| SceneLoadError::Parse(format!("unknown prism kind: {}", kind)))?;
                let center = attrs.require_vec2("center", "preset.center")?;
                let size = attrs.require_float("size", "preset.size")?;
                self.prism("preset")?.set_shape(kind.build(center, size)?)?;
            }
            b"polygon" => {
                let reference = match attrs.get("reference") {
                    Some(value) => parse_usize(value)?,
                    None => 0,
                };
                self.prism("polygon")?.polygon = Some((Vec::new(), reference));
            }
            b"point" => {
                let point = attrs.require_vec2("value", "point.value")?;
                let polygon = self.prism("point")?
                    .polygon
                    .as_mut()
                    .ok_or_else(|| SceneLoadError::Parse(String::from("<point> outside of <polygon>")))?;
                polygon.0.push(point);
            }
            b"translate" => {
                let x = attrs.float("x")?.unwrap_or(0.0);
                let y = attrs.float("y")?.unwrap_or(0.0);
                self.prism("translate")?.placement.push(Placement::Translate(Vector2f::new(x, y)));
            }
            b"rotate" => {
                let angle = attrs.require_float("angle", "rotate.angle")?.to_radians();
                self.prism("rotate")?.placement.push(Placement::Rotate(angle));
            }
            b"scene" => {}
            other => {
                log::warn!("Ignoring unknown scene element <{}>.", String::from_utf8_lossy(other));
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> SceneLoadResult<()> {
        match name {
            b"polygon" => {
                let prism = self.prism("polygon")?;
                if let Some((vertices, reference)) = prism.polygon.take() {
                    prism.set_shape(Polygon::new(vertices, reference)?.into())?;
                }
            }
            b"prism" => {
                if let Some(builder) = self.current.take() {
                    self.prisms.push(builder.build()?);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> SceneLoadResult<LoadedScene> {
        let environment = match self.environment {
            Some(medium) => medium,
            None => AIR.to_medium()?,
        };
        let bounds = self.bounds.unwrap_or_else(|| {
            Bounds2f::centered(Vector2f::zeros(), DEFAULT_HALF_EXTENT, DEFAULT_HALF_EXTENT)
        });

        let mut scene = Scene::new(environment, bounds)?;
        for prism in self.prisms {
            scene.add_prism(prism);
        }

        let defaults = RefractionTracer::default();
        let tracer = RefractionTracer::new(self.max_depth.unwrap_or(defaults.max_depth()),
                                           self.power_cutoff.unwrap_or(defaults.power_cutoff()))?;

        log::info!("Loaded scene with {} prisms in {}.", scene.len(), scene.environment().name());
        Ok(LoadedScene { scene, laser: self.laser, probe: self.probe, tracer })
    }
}

/// `index` makes a custom medium; otherwise `medium` names a preset.
fn parse_medium(attrs: &Attributes) -> SceneLoadResult<Option<Medium>> {
    if let Some(index) = attrs.float("index")? {
        let (low, high) = CUSTOM_INDEX_RANGE;
        if !(low..=high).contains(&index) {
            log::warn!("Custom index {} lies outside the adjustable range [{}, {}].", index, low, high);
        }
        return Ok(Some(Medium::custom(index)?));
    }
    match attrs.get("medium") {
        Some(name) => {
            let preset = find_preset(name)
                .ok_or_else(|| SceneLoadError::Parse(format!("unknown medium: {}", name)))?;
            Ok(Some(preset.to_medium()?))
        }
        None => Ok(None),
    }
}

fn parse_laser(attrs: &Attributes) -> SceneLoadResult<Laser> {
    let position = attrs.vec2("position")?.unwrap_or_else(Vector2f::zeros);
    let angle = attrs.float("angle")?.unwrap_or(0.0).to_radians();
    let default = Laser::default();
    let wavelength = attrs.float("wavelength")?.unwrap_or(default.wavelength());

    let color_mode = match attrs.get("mode") {
        None | Some("monochromatic") => ColorMode::Monochromatic,
        Some("white") => ColorMode::White,
        Some(other) => return Err(SceneLoadError::Parse(format!("unknown color mode: {}", other))),
    };
    let view = match attrs.get("view") {
        None | Some("ray") => LaserView::Ray,
        Some("wave") => LaserView::Wave,
        Some(other) => return Err(SceneLoadError::Parse(format!("unknown laser view: {}", other))),
    };

    let laser = Laser::new(position, angle, wavelength)?
        .with_power(attrs.float("power")?.unwrap_or(default.power()))?
        .with_color_mode(color_mode)
        .with_view(view)
        .switched(attrs.bool("on")?.unwrap_or(true));
    Ok(laser)
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> SceneLoadResult<Float> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> SceneLoadResult<u32> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> SceneLoadResult<usize> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_bool(value: &str) -> SceneLoadResult<bool> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SceneLoadError::Parse(format!("invalid boolean: {}", value))),
    }
}

fn parse_vec2(value: &str) -> SceneLoadResult<Vector2f> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec2: {}", value)))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse(format!("invalid vec2: {}", value)))?;
    if parts.next().is_some() {
        return Err(SceneLoadError::Parse(format!("invalid vec2: {}", value)));
    }
    Ok(Vector2f::new(parse_float(x)?, parse_float(y)?))
}
