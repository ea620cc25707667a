pub mod use_cases;

pub use use_cases::{
    authorize::{AuthorizeError, AuthorizeUseCase},
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    create_post::{CreatePostError, CreatePostUseCase},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    delete_post::{DeletePostError, DeletePostUseCase},
    find_posts::{FindPostsError, FindPostsUseCase},
    login::{LoginError, LoginUseCase},
    register::{RegisterError, RegisterUseCase},
    show_my_posts::{ShowMyPostsError, ShowMyPostsUseCase},
    update_post::{UpdatePostError, UpdatePostUseCase},
    update_profile::{UpdateProfileError, UpdateProfileUseCase},
};
