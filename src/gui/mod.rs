use std::time::Duration;

use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::{
    mouse, time, window, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription,
    Task, Theme,
};

use crate::plate::circle::{Circle, Rgb};
use crate::sim::{
    projection::Projector,
    system::{RunState, System},
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const BODY_COLOR: Color = Color {
    r: 1.,
    g: 1.,
    b: 0.,
    a: 1.,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Message {
    Tick,
}

pub(crate) enum Scene {
    Planar(System<2>),
    Spatial {
        system: System<3>,
        projector: Projector,
    },
    Plate(Vec<Circle>),
}

/// One filled circle of a frame, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Disc {
    pub(crate) center: Point,
    pub(crate) radius: f32,
    pub(crate) color: Color,
}

pub(crate) struct Gui {
    scene: Scene,
    ticks_per_frame: u64,
}

pub(crate) fn run(scene: Scene, size: Size, ticks_per_frame: u64) -> iced::Result {
    let window_settings = window::Settings {
        size,
        resizable: false,
        ..window::Settings::default()
    };
    let gui = Gui {
        scene,
        ticks_per_frame,
    };
    iced::application(Gui::title, Gui::update, Gui::view)
        .subscription(Gui::subscription)
        .antialiasing(true)
        .window(window_settings)
        .run_with(move || (gui, Task::none()))
}

fn color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

impl Gui {
    fn title(&self) -> String {
        match &self.scene {
            Scene::Planar(system) => format!("Many body - tick {}", system.tick),
            Scene::Spatial { system, .. } => format!("Many body 3D - tick {}", system.tick),
            Scene::Plate(circles) => format!("Colorblind plate - {} circles", circles.len()),
        }
    }

    fn state(&self) -> RunState {
        match &self.scene {
            Scene::Planar(system) => system.state(),
            Scene::Spatial { system, .. } => system.state(),
            Scene::Plate(_) => RunState::Finished,
        }
    }

    fn update(&mut self, message: Message) {
        match message {
            Message::Tick => match &mut self.scene {
                Scene::Planar(system) => {
                    system.evolve_for(self.ticks_per_frame);
                }
                Scene::Spatial { system, .. } => {
                    system.evolve_for(self.ticks_per_frame);
                }
                Scene::Plate(_) => {}
            },
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        match self.state() {
            RunState::Running => time::every(FRAME_INTERVAL).map(|_| Message::Tick),
            RunState::Finished => Subscription::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn background(&self) -> Color {
        match self.scene {
            Scene::Plate(_) => Color::WHITE,
            _ => Color::BLACK,
        }
    }

    pub(crate) fn discs(&self) -> Vec<Disc> {
        match &self.scene {
            Scene::Planar(system) => system
                .bodies
                .iter()
                .map(|body| Disc {
                    center: Point::new(body.position.x as f32, body.position.y as f32),
                    radius: body.radius as f32,
                    color: BODY_COLOR,
                })
                .collect(),
            Scene::Spatial { system, projector } => {
                let mut discs = system
                    .bodies
                    .iter()
                    .filter_map(|body| projector.silhouette(&body.position, body.radius))
                    .map(|(center, radius)| Disc {
                        center: Point::new(center.x as f32, center.y as f32),
                        radius: radius as f32,
                        color: BODY_COLOR,
                    })
                    .collect::<Vec<_>>();
                // Apparently nearer bodies look bigger and are painted last.
                discs.sort_by(|a, b| a.radius.total_cmp(&b.radius));
                discs
            }
            Scene::Plate(circles) => circles
                .iter()
                .map(|circle| Disc {
                    center: Point::new(circle.position.x as f32, circle.position.y as f32),
                    radius: circle.radius as f32,
                    color: color(circle.color),
                })
                .collect(),
        }
    }
}

impl canvas::Program<Message> for Gui {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.background());
        for disc in self.discs() {
            frame.fill(&Path::circle(disc.center, disc.radius), disc.color);
        }
        vec![frame.into_geometry()]
    }
}
