// Git module providing repository access for changelog generation

mod repository;

pub use repository::GitRepo;
