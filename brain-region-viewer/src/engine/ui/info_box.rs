use crate::engine::regions::registry::{Region, RegionRegistry};
use crate::engine::regions::resolver::RegionSelected;
use bevy::prelude::*;
use serde::Serialize;

/// Text shown for a selected region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoBoxContent {
    pub title: String,
    pub body: String,
}

impl InfoBoxContent {
    pub fn from_region(region: &Region) -> Self {
        Self {
            title: region.name.clone(),
            body: region.techniques_label(),
        }
    }

    /// Markup written into the host document's info box.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{}</strong><br>{}",
            escape_html(&self.title),
            escape_html(&self.body)
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// What the info box currently shows. Hidden until the first region is selected.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct InfoBox {
    content: Option<InfoBoxContent>,
}

impl InfoBox {
    pub fn content(&self) -> Option<&InfoBoxContent> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }
}

/// Show the most recently selected region. Without a selection the box keeps its contents.
pub fn update_info_box(
    mut selections: EventReader<RegionSelected>,
    registry: Res<RegionRegistry>,
    mut info_box: ResMut<InfoBox>,
) {
    let Some(region) = selections
        .read()
        .filter_map(|selected| registry.get(selected.region))
        .last()
    else {
        return;
    };

    info_box.content = Some(InfoBoxContent::from_region(region));
}

#[derive(Component)]
pub struct InfoPanel;

#[derive(Component)]
pub struct InfoTitle;

#[derive(Component)]
pub struct InfoBody;

/// In-engine replacement for the DOM info box on native builds.
pub fn spawn_info_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            InfoPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                InfoTitle,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                InfoBody,
            ));
        });
}

pub fn render_info_panel(
    info_box: Res<InfoBox>,
    mut panels: Query<&mut Node, With<InfoPanel>>,
    mut titles: Query<&mut Text, (With<InfoTitle>, Without<InfoBody>)>,
    mut bodies: Query<&mut Text, (With<InfoBody>, Without<InfoTitle>)>,
) {
    if !info_box.is_changed() {
        return;
    }
    let Some(content) = info_box.content() else {
        return;
    };

    for mut node in &mut panels {
        node.display = Display::Flex;
    }
    for mut text in &mut titles {
        text.0 = content.title.clone();
    }
    for mut text in &mut bodies {
        text.0 = content.body.clone();
    }
}
