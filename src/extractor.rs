//! Ties the pipeline together: settings → viewing conditions → seed →
//! scheme → slots, for direct calls and for wallpaper color events.

use std::borrow::Cow;
use crate::conditions::ViewingConditions;
use crate::error::Result;
use crate::region::{ColorEventSource, RectF, RegionSubscriber, WorkspaceGeometry};
use crate::scheme::PaletteGenerator;
use crate::seed::{resolve_seed, WallpaperColors};
use crate::settings::SettingsSource;
use crate::slots::{map_to_slots, PaletteOverride, SlotTables};

/// Receives the palette derived after each wallpaper color change.
pub trait ColorsChangedListener {
    fn on_colors_changed(&mut self, colors: PaletteOverride);
}

impl<F: FnMut(PaletteOverride)> ColorsChangedListener for F {
    fn on_colors_changed(&mut self, colors: PaletteOverride) { self(colors) }
}

/// Installs a palette, e.g. by redefining color resources.
pub trait ResourceOverrides {
    fn apply(&mut self, colors: &PaletteOverride);
}

/// Derives theme colors from wallpaper colors and keeps them in sync
/// with the wallpaper region behind the home screen.
///
/// Settings are read on every derivation.  Events are expected one
/// at a time; each one triggers exactly one derivation.
pub struct ThemedColorExtractor<S, G, E> {
    settings: S,
    generator: G,
    slots: Cow<'static, SlotTables>,
    subscriber: RegionSubscriber<E>,
    listener: Option<Box<dyn ColorsChangedListener>>,
}

impl<S, G, E> ThemedColorExtractor<S, G, E>
where S: SettingsSource, G: PaletteGenerator, E: ColorEventSource {
    pub fn new(settings: S, generator: G, events: E) -> Self {
        ThemedColorExtractor {
            settings,
            generator,
            slots: Cow::Borrowed(SlotTables::system()),
            subscriber: RegionSubscriber::new(events),
            listener: None,
        }
    }

    /// Install into `slots` instead of the system color tables.
    pub fn with_slots(mut self, slots: SlotTables) -> Self {
        self.slots = Cow::Owned(slots);
        self
    }

    pub fn set_listener(&mut self, listener: impl ColorsChangedListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) { self.listener = None }

    pub fn region(&self) -> Option<RectF> { self.subscriber.region() }

    pub fn events(&self) -> &E { self.subscriber.source() }

    /// The slot → color mapping for `colors` under the current
    /// settings.  Generator failures are returned as is.
    pub fn generate_colors_override(&self, colors: &WallpaperColors)
                                    -> Result<PaletteOverride> {
        let settings = self.settings.theme_settings();
        let conditions = ViewingConditions::new(settings.luminance());
        let seed = resolve_seed(colors.primary_color(), settings.color_override,
                                settings.override_enabled());
        let chroma = settings.chroma();
        tracing::debug!(seed = ?seed.color, provenance = ?seed.provenance,
                        chroma, luminance = settings.white_luminance,
                        "deriving palette");
        let scheme = self.generator.generate(seed.color, chroma, &conditions, true)?;
        scheme.validate()?;
        Ok(map_to_slots(&scheme, &self.slots))
    }

    /// Derive the palette for `colors` and install it into `target`.
    pub fn apply_colors_override(&self, target: &mut impl ResourceOverrides,
                                 colors: &WallpaperColors) -> Result<()> {
        let palette = self.generate_colors_override(colors)?;
        target.apply(&palette);
        Ok(())
    }

    /// Resubscribe to the wallpaper region behind a widget.  See
    /// [`RegionSubscriber::set_workspace_location`].
    pub fn set_workspace_location(&mut self, geometry: Option<&WorkspaceGeometry>)
                                  -> Option<RectF> {
        self.subscriber.set_workspace_location(geometry)
    }

    /// Handle a color change reported for `area`.
    ///
    /// Events for a region other than the subscribed one are stale and
    /// ignored.  Without a listener nothing is derived.
    pub fn on_colors_changed(&mut self, area: RectF, colors: &WallpaperColors)
                             -> Result<()> {
        if self.subscriber.region() != Some(area) {
            tracing::debug!(?area, current = ?self.subscriber.region(),
                            "ignoring colors for stale region");
            return Ok(())
        }
        if self.listener.is_none() { return Ok(()) }
        let palette = self.generate_colors_override(colors)?;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_colors_changed(palette);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use rgb::RGB8;
    use super::*;
    use crate::color::to_argb;
    use crate::error::Error;
    use crate::region::Rect;
    use crate::scheme::{Channel, ColorScheme, TonalGenerator, SHADES};
    use crate::settings::ThemeSettings;
    use crate::slots::SlotId;

    #[derive(Debug, Default)]
    struct Events(Vec<RectF>);

    impl ColorEventSource for Events {
        fn add_colors_listener(&mut self, regions: &[RectF]) {
            self.0.extend_from_slice(regions)
        }
        fn remove_colors_listener(&mut self) { self.0.clear() }
    }

    /// Every shade of every channel is the seed.
    fn echo(seed: RGB8, _: f64, _: &ViewingConditions, _: bool)
            -> Result<ColorScheme> {
        let p: crate::scheme::ChannelPalette =
            SHADES.iter().map(|&s| (s, seed)).collect();
        Ok(ColorScheme { accent1: p.clone(), accent2: p.clone(),
                         accent3: p.clone(), neutral1: p.clone(), neutral2: p })
    }

    fn accent1_500(p: &PaletteOverride) -> Option<u32> {
        p.get(SlotTables::system().slot(Channel::Accent1, 500).unwrap())
    }

    const WALLPAPER: WallpaperColors = WallpaperColors {
        primary: RGB8 { r: 0x44, g: 0x55, b: 0x66 },
    };

    fn geometry() -> WorkspaceGeometry {
        WorkspaceGeometry {
            bounds: Rect::new(100, 100, 200, 200),
            surface_offset: (0, 0),
            screen_width: 1000,
            screen_height: 2000,
            num_pages: 5,
            page_index: 2,
        }
    }

    #[test]
    fn override_color_seeds_the_palette() {
        let settings = Rc::new(RefCell::new(ThemeSettings::default()));
        let ex = ThemedColorExtractor::new(settings.clone(), echo, Events::default());
        let p = ex.generate_colors_override(&WALLPAPER).unwrap();
        assert_eq!(accent1_500(&p), Some(0xff44_5566));

        settings.borrow_mut().custom_color = 1;
        settings.borrow_mut().color_override = 0x112233;
        let p = ex.generate_colors_override(&WALLPAPER).unwrap();
        assert_eq!(accent1_500(&p), Some(0xff11_2233));
        assert_eq!(p.len(), 65);
    }

    #[test]
    fn derivation_is_deterministic() {
        let ex = ThemedColorExtractor::new(ThemeSettings::default(),
                                           TonalGenerator::default(),
                                           Events::default());
        let a = ex.generate_colors_override(&WALLPAPER).unwrap();
        let b = ex.generate_colors_override(&WALLPAPER).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.get(SlotId(0x0106_0037)),
                   Some(to_argb(RGB8::new(255, 255, 255))));
    }

    #[test]
    fn generator_errors_propagate() {
        let fail = |_: RGB8, _: f64, _: &ViewingConditions, _: bool| {
            Err::<ColorScheme, _>(Error::Generation("boom".into()))
        };
        let ex = ThemedColorExtractor::new(ThemeSettings::default(), fail,
                                           Events::default());
        assert!(matches!(ex.generate_colors_override(&WALLPAPER),
                         Err(Error::Generation(_))));
    }

    #[test]
    fn incomplete_schemes_are_rejected() {
        let partial = |seed: RGB8, k: f64, vc: &ViewingConditions, t: bool| {
            let mut s = echo(seed, k, vc, t)?;
            s.accent2.remove(&10);
            Ok::<_, Error>(s)
        };
        let ex = ThemedColorExtractor::new(ThemeSettings::default(), partial,
                                           Events::default());
        assert!(matches!(ex.generate_colors_override(&WALLPAPER),
                         Err(Error::MissingShade { channel: "accent2", shade: 10 })));
    }

    #[test]
    fn events_reach_the_listener() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut ex = ThemedColorExtractor::new(ThemeSettings::default(), echo,
                                               Events::default());
        let sink = received.clone();
        ex.set_listener(move |p: PaletteOverride| sink.borrow_mut().push(p));

        let area = ex.set_workspace_location(Some(&geometry())).unwrap();
        assert_eq!(ex.events().0, [area]);
        ex.on_colors_changed(area, &WALLPAPER).unwrap();
        ex.on_colors_changed(area, &WALLPAPER).unwrap();
        assert_eq!(received.borrow().len(), 2);
        assert_eq!(accent1_500(&received.borrow()[0]), Some(0xff44_5566));

        let stale = RectF { left: 0., top: 0., right: 0.1, bottom: 0.1 };
        ex.on_colors_changed(stale, &WALLPAPER).unwrap();
        assert_eq!(received.borrow().len(), 2);
    }

    #[test]
    fn no_listener_is_a_no_op() {
        let mut ex = ThemedColorExtractor::new(ThemeSettings::default(), echo,
                                               Events::default());
        let area = ex.set_workspace_location(Some(&geometry())).unwrap();
        assert!(ex.on_colors_changed(area, &WALLPAPER).is_ok());
    }

    #[test]
    fn apply_installs_palette() {
        struct Resources(Option<PaletteOverride>);
        impl ResourceOverrides for Resources {
            fn apply(&mut self, colors: &PaletteOverride) {
                self.0 = Some(colors.clone())
            }
        }
        let ex = ThemedColorExtractor::new(ThemeSettings::default(), echo,
                                           Events::default());
        let mut res = Resources(None);
        ex.apply_colors_override(&mut res, &WALLPAPER).unwrap();
        assert_eq!(res.0.map(|p| p.len()), Some(65));
    }

    #[test]
    fn infinite_chroma_setting_still_derives() {
        use std::collections::HashMap;
        use crate::settings::KEY_CHROMA_FACTOR;
        let store: HashMap<String, String> =
            [(KEY_CHROMA_FACTOR.to_string(), "inf".to_string())].into();
        let ex = ThemedColorExtractor::new(store, TonalGenerator::default(),
                                           Events::default());
        let p = ex.generate_colors_override(&WALLPAPER).unwrap();
        assert_eq!(p.len(), 65);
    }

    #[test]
    fn custom_sparse_slots() {
        use crate::slots::SlotTable;
        let slots = SlotTables::new([
            (Channel::Accent1, SlotTable::from([(500, SlotId(1))])),
            (Channel::Neutral1, SlotTable::from([(0, SlotId(2))])),
        ]).unwrap();
        let ex = ThemedColorExtractor::new(ThemeSettings::default(), echo,
                                           Events::default())
            .with_slots(slots);
        let p = ex.generate_colors_override(&WALLPAPER).unwrap();
        let v: Vec<_> = p.iter().collect();
        assert_eq!(v, [(SlotId(1), 0xff44_5566), (SlotId(2), 0xff44_5566)]);
    }
}
