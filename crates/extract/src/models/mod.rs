mod release;

pub use self::release::Release;
