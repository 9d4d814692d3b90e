// src/gui/pages/info.rs
//
// Static text pages.

use eframe::egui;

use super::Page;
use crate::gui::app::App;
use crate::router::Tab;

pub struct InfoPage {
    tab: Tab,
    title: &'static str,
    body: &'static [(&'static str, &'static str)],
}

impl Page for InfoPage {
    fn tab(&self) -> Tab { self.tab }
    fn title(&self) -> &'static str { self.title }

    fn draw(&self, ui: &mut egui::Ui, _app: &mut App) {
        ui.heading(self.title);
        for (head, text) in self.body {
            ui.add_space(6.0);
            ui.strong(*head);
            ui.label(*text);
        }
    }
}

pub static FAQ: InfoPage = InfoPage {
    tab: Tab::Faq,
    title: "常见问题",
    body: &[
        ("为什么题目没有变色？", "题目状态按搜索框里的 UID 查询；留空时使用当前登录的牛客账号。未登录且未填写 UID 时不会着色。"),
        ("绿色和黄色分别代表什么？", "绿色是自己已通过，黄色是对手已通过而自己还没有。整行全部通过时行首会出现 ✔。"),
        ("打卡奖励怎么算？", "每日打卡得 2 牛币，连续打卡每满 7 天额外奖励 20 牛币。"),
        ("团队邀请链接怎么用？", "在地址栏输入 #/team/<团队ID>/join，确认后即提交加入申请。"),
        ("数据从哪里来？", "题目与排名来自牛客 Tracker 接口，周赛与 clist 题目由管理页的抓取工具生成。"),
    ],
};

pub static CHANGELOG: InfoPage = InfoPage {
    tab: Tab::Changelog,
    title: "更新日志",
    body: &[
        ("桌面版", "题库、每日一题、排行榜、团队、对战、成就与个人卡片迁移到原生窗口。"),
        ("抓取工具", "牛客周赛与 clist 抓取可从命令行或管理页运行，结果写入当前目录。"),
        ("分享卡片", "个人页可生成单人卡片或与对手的对比卡片。"),
    ],
};
