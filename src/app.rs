//! 终端展示层
//!
//! 逐行读取问题，交给调度器，再把展示结果打印出来。
//! Ctrl-C 取消正在处理的问题；没有问题在处理时退出程序。

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::clients::HttpAskClient;
use crate::config::Config;
use crate::error::{AppResult, AskError};
use crate::services::presenter::{self, present};
use crate::utils::logging::log_startup;
use crate::workflow::{AskSession, Dispatcher};

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// 应用主结构
pub struct App {
    config: Config,
    dispatcher: Dispatcher<HttpAskClient>,
    session: AskSession,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config);

        let dispatcher = Dispatcher::new(HttpAskClient::new(&config), config.retry_policy());

        Self {
            config,
            dispatcher,
            session: AskSession::new(),
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<()> {
        self.run_with(BufReader::new(tokio::io::stdin()), interrupted).await
    }

    /// 从任意输入读取问题，`interrupt` 完成即视为一次 Ctrl-C
    async fn run_with<R, F, Fut>(&self, input: R, interrupt: F) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        F: Fn() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut lines = input.lines();

        println!("Ask a question about CDP documentation ({} to leave).", QUIT_COMMANDS[0]);

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = interrupt() => {
                    info!("收到 Ctrl-C，退出");
                    break;
                }
            };
            let Some(line) = line else {
                break;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if QUIT_COMMANDS.contains(&line) {
                break;
            }

            self.handle_question(line, &interrupt).await;
        }

        info!("👋 会话结束");
        Ok(())
    }

    async fn handle_question<F, Fut>(&self, text: &str, interrupt: &F)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()>,
    {
        println!("[{}] You: {}", timestamp(), presenter::user_message(text));

        let ask = self.dispatcher.ask(&self.session, text);
        tokio::pin!(ask);

        let result = tokio::select! {
            result = &mut ask => result,
            _ = interrupt() => {
                if self.session.cancel() {
                    debug!("收到 Ctrl-C，取消当前问题");
                }
                ask.await
            }
        };

        match result {
            Ok(payload) => {
                let presentation = present(&payload, self.config.render_mode);
                println!("[{}] Assistant:\n{}", timestamp(), presentation);
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn show_error(&self, err: &AskError) {
        let notice = err.notice(self.config.error_display());
        eprintln!(
            "⚠️ {} (dismisses after {}s)",
            notice.message,
            notice.display_for.as_secs()
        );
    }
}

/// 等待 Ctrl-C；无法监听信号时永远挂起
///
/// 监听一旦注册，默认的 SIGINT 退出就失效了，所以提问和等待输入时都要监听。
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("无法监听 Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
