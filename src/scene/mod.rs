mod home;
mod town;

pub use home::HomeScene;
pub use town::TownScene;

pub enum SceneTransition {
    None,
    Push(Box<dyn Scene>),
    Pop,
    Replace(Box<dyn Scene>),
}

pub trait Scene {
    fn update(&mut self) -> SceneTransition;
    fn draw(&self);
}
